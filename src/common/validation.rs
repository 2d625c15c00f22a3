// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::error::AppError;

// ---
// Validações customizadas (usadas pelos payloads via `#[validate(custom(...))]`)
// ---

/// Maior valor que cabe em `NUMERIC(10, 2)`.
// 9_999_999_999 com escala 2 (lo + mid * 2^32)
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn money_error(code: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(code.into());
    err
}

/// Valor monetário gravável como está: não negativo, no máximo 2 casas e
/// dentro do limite da coluna. Assim o saldo calculado é o mesmo que fica no banco.
pub fn validate_money(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("must_not_be_negative".into());
        return Err(err);
    }
    if val.normalize().scale() > 2 {
        return Err(money_error("too_many_decimals"));
    }
    if *val > MAX_MONEY {
        return Err(money_error("too_large"));
    }
    Ok(())
}

pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("required".into());
        return Err(err);
    }
    Ok(())
}

/// Valida um valor textual contra um conjunto fechado (enum do domínio).
pub fn validate_closed_set<T: std::str::FromStr>(
    value: &str,
    code: &'static str,
) -> Result<(), ValidationError> {
    value.parse::<T>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new(code);
        err.message = Some(code.into());
        err
    })
}

/// Roda o `validator` e converte o resultado em `AppError`.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::ValidationError)
}

/// Erro de validação de um único campo.
pub fn field_error(field: &'static str, code: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    let mut err = ValidationError::new(code);
    err.message = Some(code.into());
    errors.add(field, err);
    AppError::ValidationError(errors)
}

/// Extrai um campo obrigatório já validado, sem `unwrap`.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| field_error(field, "required"))
}

/// Converte o valor textual de um enum, reportando erro no campo.
pub fn parse_enum<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    code: &'static str,
) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| field_error(field, code))
}

/// `first_name` -> `firstName`
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
