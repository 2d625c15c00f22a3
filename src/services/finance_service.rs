// src/services/finance_service.rs

use rust_decimal::Decimal;

use crate::models::sale::PaymentStatus;

/// Saldo e status derivados de (total, sinal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentBreakdown {
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
}

/// Única fonte de `remaining_balance` e `payment_status` de uma venda.
///
/// Sinal maior que o total não gera saldo negativo: a venda fica quitada.
pub fn compute_payment(total_amount: Decimal, deposit: Decimal) -> PaymentBreakdown {
    let remaining_balance = (total_amount - deposit).max(Decimal::ZERO);

    let payment_status = if remaining_balance <= Decimal::ZERO {
        PaymentStatus::Completed
    } else if remaining_balance < total_amount {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    };

    PaymentBreakdown { remaining_balance, payment_status }
}
