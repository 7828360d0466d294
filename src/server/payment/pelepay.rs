//! Pelepay hosted payment page.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use url::Url;

use crate::server::{
    error::payment::PaymentError,
    payment::{
        GatewayCallback, PaymentForm, PaymentProcessor, PreparedTransaction, TransactionRequest,
    },
    util::input::Input,
};

pub const CALLBACK_PATH: &str = "/api/payment/pelepay/callback";

const RESPONSE_KEY: &str = "pelepay-response";

/// Callback field names mapped to the keys stored in processor data.
const RESPONSE_FIELDS: [(&str, &str); 11] = [
    ("Response", "response"),
    ("ConfirmationCode", "confirmation-code"),
    ("index", "index"),
    ("amount", "amount"),
    ("firstname", "firstname"),
    ("lastname", "lastname"),
    ("email", "email"),
    ("phone", "phone"),
    ("payfor", "payfor"),
    ("custom", "custom"),
    ("orderid", "orderid"),
];

pub struct Pelepay {
    business: String,
    pay_url: String,
    callback_url: String,
}

impl Pelepay {
    /// # Arguments
    /// - `business` - Merchant account (email) at Pelepay
    /// - `pay_url` - Hosted payment page the form posts to
    /// - `app_url` - Public base URL of this application, without trailing slash
    pub fn new(business: String, pay_url: String, app_url: &str) -> Self {
        Self {
            business,
            pay_url,
            callback_url: format!("{}{}", app_url, CALLBACK_PATH),
        }
    }

    fn callback_url(&self, sale_id: i32, status: &str) -> String {
        let sale_id = sale_id.to_string();
        match Url::parse_with_params(
            &self.callback_url,
            &[("sale", sale_id.as_str()), ("status", status)],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}?sale={}&status={}", self.callback_url, sale_id, status),
        }
    }
}

impl PaymentProcessor for Pelepay {
    fn name(&self) -> &'static str {
        "pelepay"
    }

    fn create_transaction(&self, request: &TransactionRequest<'_>) -> PreparedTransaction {
        let sale_id = request.sale.id;

        let mut fields = BTreeMap::from([
            ("business".to_string(), self.business.clone()),
            ("amount".to_string(), format_amount(request.total)),
            ("orderid".to_string(), sale_id.to_string()),
            (
                "description".to_string(),
                format!("Sale #{} for {}", sale_id, request.convention_title),
            ),
            (
                "success_return".to_string(),
                self.callback_url(sale_id, "success"),
            ),
            ("fail_return".to_string(), self.callback_url(sale_id, "fail")),
            (
                "cancel_return".to_string(),
                self.callback_url(sale_id, "cancel"),
            ),
            ("b2b".to_string(), self.callback_url(sale_id, "b2b")),
        ]);

        let buyer = request.buyer;
        if !buyer.name.trim().is_empty() {
            let (first, last) = buyer.first_last_name();
            fields.insert("firstname".to_string(), first);
            fields.insert("lastname".to_string(), last);
        }
        if let Some(phone) = buyer.phone.as_ref().filter(|p| !p.is_empty()) {
            fields.insert("phone".to_string(), phone.clone());
        }
        if !buyer.email.is_empty() {
            fields.insert("email".to_string(), buyer.email.clone());
        }

        let mut processor_data = Map::new();
        processor_data.insert("ok".to_string(), json!(request.ok_url));
        processor_data.insert("fail".to_string(), json!(request.fail_url));

        PreparedTransaction {
            form: PaymentForm {
                action: self.pay_url.clone(),
                method: "POST".to_string(),
                fields,
            },
            processor_data,
        }
    }

    fn parse_callback(&self, input: &Input) -> Result<GatewayCallback, PaymentError> {
        let sale = input.get("sale").ok_or(PaymentError::MissingField("sale"))?;
        let status = input.get("status").unwrap_or_default();

        let response: Map<String, Value> = RESPONSE_FIELDS
            .iter()
            .map(|(field, key)| {
                let value = input.get(field).map(Value::String).unwrap_or(Value::Null);
                (key.to_string(), value)
            })
            .collect();

        let transaction_id = format!(
            "{}:{}",
            input.get("index").unwrap_or_default(),
            input.get("ConfirmationCode").unwrap_or_default()
        );

        Ok(GatewayCallback {
            sale,
            status,
            reason: input.get("Response"),
            transaction_id,
            response_key: RESPONSE_KEY,
            response,
        })
    }
}

/// Formats a price the way the payment page expects it, without trailing zeros.
fn format_amount(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{}", total as i64)
    } else {
        format!("{:.2}", total)
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::server::model::{sale::PaymentOutcome, sale::Sale, user::User};

    fn pelepay() -> Pelepay {
        Pelepay::new(
            "shop@example.com".to_string(),
            "https://pay.example.com/page".to_string(),
            "https://con.example.com",
        )
    }

    fn sale() -> Sale {
        Sale {
            id: 42,
            convention_id: 1,
            user_id: 7,
            cashier_id: None,
            original_sale_id: None,
            transaction_id: None,
            sale_time: Utc::now(),
            cancellation_notes: None,
            processor_data: Map::new(),
        }
    }

    fn buyer(name: &str, phone: Option<&str>) -> User {
        User {
            id: 7,
            email: "visitor@example.com".to_string(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    /// Tests that the payment form carries the order, callbacks and buyer pre-fill.
    #[test]
    fn builds_payment_form() {
        let sale = sale();
        let buyer = buyer("Ada King Lovelace", Some("050-1234567"));
        let prepared = pelepay().create_transaction(&TransactionRequest {
            sale: &sale,
            buyer: &buyer,
            convention_title: "SpringCon",
            total: 150.0,
            ok_url: "https://con.example.com/ok",
            fail_url: "https://con.example.com/fail",
        });

        let fields = &prepared.form.fields;
        assert_eq!(prepared.form.action, "https://pay.example.com/page");
        assert_eq!(fields["business"], "shop@example.com");
        assert_eq!(fields["amount"], "150");
        assert_eq!(fields["orderid"], "42");
        assert_eq!(fields["description"], "Sale #42 for SpringCon");
        assert_eq!(
            fields["success_return"],
            "https://con.example.com/api/payment/pelepay/callback?sale=42&status=success"
        );
        assert!(fields["b2b"].ends_with("status=b2b"));
        assert_eq!(fields["firstname"], "Ada");
        assert_eq!(fields["lastname"], "King Lovelace");
        assert_eq!(fields["phone"], "050-1234567");
        assert_eq!(fields["email"], "visitor@example.com");

        assert_eq!(
            Value::Object(prepared.processor_data),
            json!({"ok": "https://con.example.com/ok", "fail": "https://con.example.com/fail"})
        );
    }

    /// Tests that an empty name and phone are not pre-filled.
    #[test]
    fn skips_missing_buyer_details() {
        let sale = sale();
        let buyer = buyer("", None);
        let prepared = pelepay().create_transaction(&TransactionRequest {
            sale: &sale,
            buyer: &buyer,
            convention_title: "SpringCon",
            total: 12.5,
            ok_url: "ok",
            fail_url: "fail",
        });

        let fields = &prepared.form.fields;
        assert_eq!(fields["amount"], "12.50");
        assert!(!fields.contains_key("firstname"));
        assert!(!fields.contains_key("phone"));
    }

    /// Tests decoding a successful callback into the stored response and transaction id.
    #[test]
    fn parses_callback_fields() {
        let input = Input::parse(
            None,
            Some("sale=42&status=success&Response=000&ConfirmationCode=ABC&index=9&amount=150"),
            b"",
        )
        .unwrap();

        let callback = pelepay().parse_callback(&input).unwrap();

        assert_eq!(callback.sale, "42");
        assert_eq!(callback.outcome(), Ok(PaymentOutcome::Success));
        assert_eq!(callback.transaction_id, "9:ABC");
        assert_eq!(callback.response_key, "pelepay-response");
        assert_eq!(callback.response["response"], json!("000"));
        assert_eq!(callback.response["confirmation-code"], json!("ABC"));
        assert_eq!(callback.response["email"], Value::Null);
    }

    /// Tests that statuses outside success/fail/cancel are rejected, including b2b.
    #[test]
    fn rejects_unknown_status() {
        for status in ["b2b", "refund", ""] {
            let input = Input::from_map(
                json!({"sale": "1", "status": status})
                    .as_object()
                    .cloned()
                    .unwrap(),
            );
            let callback = pelepay().parse_callback(&input).unwrap();

            assert_eq!(
                callback.outcome(),
                Err(PaymentError::UnknownStatus(status.to_string()))
            );
        }
    }

    /// Tests that a callback without a sale id is rejected.
    #[test]
    fn requires_sale_field() {
        let input = Input::parse(None, Some("status=success"), b"").unwrap();

        assert_eq!(
            pelepay().parse_callback(&input).err(),
            Some(PaymentError::MissingField("sale"))
        );
    }
}
