use serde::{Deserialize, Serialize};

/// Core product entity. Price is kept as integer cents in storage and crosses
/// the wire as a decimal under `precio`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    #[sqlx(rename = "nombre")]
    pub name: String,
    /// Price stored as integer cents (e.g. 1100 = $11.00)
    #[serde(rename = "precio", with = "cents_as_decimal")]
    #[sqlx(rename = "precio_cents")]
    pub price_cents: i64,
    pub stock: i64,
}

impl Product {
    /// Price as a floating-point amount for display purposes.
    pub fn price_dollars(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }
}

mod cents_as_decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0.0 {
            return Err(de::Error::custom("precio must be a non-negative number"));
        }
        Ok((value * 100.0).round() as i64)
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// `?cantidad=N` on the stock adjustment endpoints.
#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub cantidad: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make(id: i64, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Producto {}", id),
            price_cents,
            stock,
        }
    }

    #[test]
    fn serializes_with_spanish_camel_case_keys() {
        let value = serde_json::to_value(make(1, 1100, 10)).unwrap();
        assert_eq!(
            value,
            json!({ "id": 1, "nombre": "Producto 1", "precio": 11.0, "stock": 10 })
        );
    }

    #[test]
    fn deserializes_decimal_price_into_cents() {
        let p: Product =
            serde_json::from_value(json!({ "id": 3, "nombre": "X", "precio": 12.99, "stock": 0 }))
                .unwrap();
        assert_eq!(p.price_cents, 1299);
    }

    #[test]
    fn rejects_negative_price() {
        let res: Result<Product, _> =
            serde_json::from_value(json!({ "id": 3, "nombre": "X", "precio": -1.0, "stock": 0 }));
        assert!(res.is_err());
    }

    #[test]
    fn price_dollars_conversion() {
        let p = make(1, 1550, 1);
        assert!((p.price_dollars() - 15.5).abs() < f64::EPSILON);
    }
}
