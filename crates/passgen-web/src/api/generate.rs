use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use passgen_core::{generate_many, unix_now, CoreError, GenerationRequest, Tier};

use crate::dto::{GenerateQuery, GenerateResponse};
use crate::error::AppError;
use crate::middleware::rate_limit::ClientId;
use crate::state::AppState;

pub async fn generate(
    State(state): State<AppState>,
    client: Option<Extension<ClientId>>,
    tier: Option<Extension<Tier>>,
    query: Result<Query<GenerateQuery>, QueryRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest {
        reason: "invalid_query",
        message: rejection.body_text(),
    })?;
    let limits = &state.config.generator;

    let length = match query.length.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| CoreError::InvalidLength("length must be an integer".to_string()))?,
        None => limits.default_length as i64,
    };
    let count = match query.count.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| CoreError::InvalidCount("count must be an integer".to_string()))?,
        None => 1,
    };

    let request = GenerationRequest::from_flags(
        length,
        parse_flag(query.upper.as_deref()),
        parse_flag(query.numbers.as_deref()),
        parse_flag(query.special.as_deref()),
        count,
        limits,
    )?;

    let passwords = generate_many(&request, &mut rand::thread_rng())?;

    state.stats.record(passwords.len(), unix_now());

    let client = client.map_or_else(|| "unknown".to_string(), |Extension(ClientId(id))| id);
    let tier = tier.map_or(Tier::Standard, |Extension(t)| t);
    tracing::info!(
        "Generated {} password(s) | client={client} | tier={} | length={} | upper={} | numbers={} | special={}",
        passwords.len(),
        tier.as_str(),
        request.length(),
        request.include_upper(),
        request.include_digits(),
        request.include_special(),
    );

    Ok(Json(GenerateResponse { passwords }))
}

/// Flags default to on; anything other than a case-insensitive `true`
/// turns them off.
fn parse_flag(raw: Option<&str>) -> bool {
    raw.map_or(true, |v| v.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_true() {
        assert!(parse_flag(None));
    }

    #[test]
    fn flag_parsing_is_case_insensitive() {
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some("True")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(Some("")));
    }
}
