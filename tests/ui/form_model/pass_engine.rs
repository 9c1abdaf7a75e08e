use formstate::prelude::*;

#[derive(Clone, Debug, PartialEq, formstate::form::FormModel)]
struct Login {
    email: String,
    password: String,
}

fn main() {
    let fields = Login::fields();
    let table = FieldTable::<Login>::new()
        .rule(fields.email(), |value: &String, _form: &Login| {
            (!value.contains('@')).then(|| "enter a valid email".to_string())
        })
        .transform(fields.email(), |value: String, _form: &Login| {
            value.trim().to_lowercase()
        });
    let form = FormController::new(
        Login {
            email: String::new(),
            password: String::new(),
        },
        table,
    )
    .expect("form builds");

    form.set_text("email", "  ME@EXAMPLE.COM ").expect("email changes");
    let mut submitted = None;
    let outcome = form
        .submit(|values| submitted = Some(values.clone()))
        .expect("submit runs");
    assert_eq!(outcome, SubmitState::Accepted);
    assert_eq!(
        submitted.map(|values| values.email),
        Some("me@example.com".to_string())
    );
}
