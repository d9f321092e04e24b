//! Text notation for orders.
//!
//! The notation is the one [`Order`]'s `Display` writes, so formatted orders
//! parse back unchanged. Province names are lowercase with an optional
//! `/coast` suffix; movement orders may be prefixed with the unit letter
//! (`A par - bur`), which is accepted and ignored.
//!
//! ```text
//! par H
//! par - bur
//! lon - nwy via convoy
//! mun S kie H         (or: mun S kie)
//! mun S kie - ber
//! nth C lon - nwy
//! stp/nc B Fleet        (or: stp/nc B F)
//! par D
//! ```

use thiserror::Error;

use crate::board::order::Order;
use crate::board::province::Province;
use crate::board::unit::UnitType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown unit type '{0}'")]
    UnknownUnitType(String),

    #[error("malformed province '{0}'")]
    MalformedProvince(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
}

/// Cursor over the whitespace-separated tokens of one order.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str, NotationError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(NotationError::UnexpectedEnd(expected))?;
        self.pos += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn expect(&mut self, want: &'static str) -> Result<(), NotationError> {
        let found = self.next(want)?;
        if found != want {
            return Err(NotationError::UnexpectedToken {
                expected: want,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn province(&mut self) -> Result<Province, NotationError> {
        parse_province(self.next("province")?)
    }

    fn finish(&self) -> Result<(), NotationError> {
        match self.peek() {
            None => Ok(()),
            Some(extra) => Err(NotationError::UnexpectedToken {
                expected: "end of order",
                found: extra.to_string(),
            }),
        }
    }
}

fn parse_province(token: &str) -> Result<Province, NotationError> {
    let valid_part = |part: &str| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    };
    let mut parts = token.split('/');
    let base = parts.next().unwrap_or_default();
    let coast = parts.next();
    if !valid_part(base) || coast.is_some_and(|c| !valid_part(c)) || parts.next().is_some() {
        return Err(NotationError::MalformedProvince(token.to_string()));
    }
    Ok(Province::from(token))
}

fn parse_unit_type(token: &str) -> Result<UnitType, NotationError> {
    match token {
        "A" | "Army" => Ok(UnitType::Army),
        "F" | "Fleet" => Ok(UnitType::Fleet),
        other => Err(NotationError::UnknownUnitType(other.to_string())),
    }
}

/// Parses one order. `at` orders competing builds and disbands: lower is
/// earlier.
pub fn parse_order(s: &str, at: u64) -> Result<Order, NotationError> {
    let mut tokens = Tokens {
        tokens: s.split_whitespace().collect(),
        pos: 0,
    };
    if tokens.peek().is_none() {
        return Err(NotationError::EmptyInput);
    }
    if matches!(tokens.peek(), Some("A") | Some("F")) {
        tokens.pos += 1;
    }

    let source = tokens.province()?;
    let order = match tokens.next("action (H, -, S, C, B, D)")? {
        "H" => Order::hold(source),
        "-" => {
            let dest = tokens.province()?;
            if tokens.peek() == Some("via") {
                tokens.pos += 1;
                if tokens.peek() == Some("convoy") {
                    tokens.pos += 1;
                }
                Order::move_via_convoy(source, dest)
            } else {
                Order::move_to(source, dest)
            }
        }
        "S" => {
            if matches!(tokens.peek(), Some("A") | Some("F")) {
                tokens.pos += 1;
            }
            let target = tokens.province()?;
            match tokens.peek() {
                None => Order::support_hold(source, target),
                Some("H") => {
                    tokens.pos += 1;
                    Order::support_hold(source, target)
                }
                Some("-") => {
                    tokens.pos += 1;
                    Order::support_move(source, target, tokens.province()?)
                }
                Some(other) => {
                    return Err(NotationError::UnexpectedToken {
                        expected: "H or -",
                        found: other.to_string(),
                    })
                }
            }
        }
        "C" => {
            if tokens.peek() == Some("A") {
                tokens.pos += 1;
            }
            let from = tokens.province()?;
            tokens.expect("-")?;
            Order::convoy(source, from, tokens.province()?)
        }
        "B" => {
            let unit_type = parse_unit_type(tokens.next("unit type")?)?;
            Order::build(source, unit_type, at)
        }
        "D" => Order::disband(source, at),
        other => return Err(NotationError::UnknownAction(other.to_string())),
    };
    tokens.finish()?;
    Ok(order)
}

/// Parses several orders separated by `;` or newlines. Builds and disbands
/// are timed in the order they appear, starting at `first_at`.
pub fn parse_orders(s: &str, first_at: u64) -> Result<Vec<Order>, NotationError> {
    s.split([';', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .zip(first_at..)
        .map(|(part, at)| parse_order(part, at))
        .collect()
}

pub fn format_orders(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
