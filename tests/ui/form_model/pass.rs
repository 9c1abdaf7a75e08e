use formstate::form::{FieldLens, FieldValue, FormModel};

#[derive(Clone, formstate::form::FormModel)]
struct DemoForm {
    email: String,
    r#type: String,
    subscribe: bool,
}

fn main() {
    let fields = DemoForm::fields();
    let lens = fields.email();
    let mut model = DemoForm {
        email: "a@example.com".to_string(),
        r#type: "personal".to_string(),
        subscribe: false,
    };
    lens.set(&mut model, "b@example.com".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "b@example.com");
    assert_eq!(fields.r#type().key().as_str(), "type");

    let keys = DemoForm::field_keys()
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["email", "type", "subscribe"]);

    model
        .write_field(fields.subscribe().key(), FieldValue::Bool(true))
        .expect("bool field accepts a bool value");
    assert_eq!(
        model.read_field(fields.subscribe().key()),
        Some(FieldValue::Bool(true))
    );
    assert!(
        model
            .write_field(fields.subscribe().key(), FieldValue::from("yes"))
            .is_err()
    );
}
