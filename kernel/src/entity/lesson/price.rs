use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonPrice(f64);

impl LessonPrice {
    pub fn new(price: impl Into<f64>) -> Self {
        Self(price.into())
    }

    /// Decimal text used for substring matching, e.g. `42` or `42.5`.
    ///
    /// Spelled the way PostgreSQL prints a `double precision`: shortest
    /// round-trip digits, switching to `1e+21` / `1e-05` notation when the
    /// decimal exponent is below -4 or at least 15.
    pub fn to_text(&self) -> String {
        let value = self.0;
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        let scientific = format!("{:e}", value);
        let (mantissa, exponent) = match scientific.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
            None => return value.to_string(),
        };
        if value != 0.0 && (exponent < -4 || exponent >= 15) {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        } else {
            value.to_string()
        }
    }
}
