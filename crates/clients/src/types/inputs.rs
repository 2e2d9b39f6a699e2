//! Caller-supplied payloads. Missing text fields arrive as empty strings.

#[derive(Debug, Clone, Default)]
pub struct NewCommissioner {
    pub name: String,
    pub identity_number: String,
    pub phone_number: String,
    pub password: String,
    pub service_item_id: Option<i64>,
}

impl NewCommissioner {
    pub(crate) fn has_required_fields(&self) -> bool {
        [
            &self.name,
            &self.identity_number,
            &self.phone_number,
            &self.password,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }
}

/// Partial update. Blank strings count as "not provided".
#[derive(Debug, Clone, Default)]
pub struct CommissionerPatch {
    pub name: Option<String>,
    pub identity_number: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub service_item_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AssignOrder {
    pub commissioner_id: Option<i64>,
    pub order_id: Option<i64>,
}

pub(crate) fn provided(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_reject_blanks() {
        let mut input = NewCommissioner {
            name: "Budi".to_string(),
            identity_number: "3174".to_string(),
            phone_number: "0811".to_string(),
            password: "secret".to_string(),
            service_item_id: None,
        };
        assert!(input.has_required_fields());

        input.password = "  ".to_string();
        assert!(!input.has_required_fields());
    }

    #[test]
    fn blank_patch_values_are_ignored() {
        assert_eq!(provided(&Some(" ".to_string())), None);
        assert_eq!(provided(&None), None);
        assert_eq!(provided(&Some("x".to_string())), Some("x".to_string()));
    }
}
