#![allow(dead_code)]

use h2m_mapping::{FieldError, Mappings, Model, Value};
use std::any::Any;
use std::borrow::Cow;

#[derive(Debug, Default, Clone, PartialEq, Model)]
pub struct User {
    pub name: Option<String>,
    pub email: Option<String>,
    #[model(rename = "login_count")]
    pub logins: Option<u32>,
    #[model(read_only)]
    pub readonly: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[model(name = "Account")]
pub struct Account {
    pub number: Option<String>,
    pub balance: i64,
    #[model(read_only)]
    pub locked: bool,
}

/// Hand-written model whose setter refuses negative ages.
#[derive(Debug, Default)]
pub struct Person {
    pub age: Option<u8>,
    pub readonly: bool,
}

impl Model for Person {
    fn model_name(&self) -> Cow<'static, str> {
        Cow::Borrowed("Person")
    }

    fn mark_read_only(&mut self) {
        self.readonly = true;
    }

    fn is_read_only(&self) -> bool {
        self.readonly
    }

    fn field_names(&self) -> Vec<Cow<'static, str>> {
        vec![Cow::Borrowed("age")]
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            "age" => match value.as_i64() {
                Some(age) if age < 0 => Err(FieldError::rejected(field, "age cannot be negative")),
                _ => {
                    self.age = h2m_mapping::model::convert(field, value)?;
                    Ok(())
                },
            },
            other => Err(FieldError::unknown(other)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// An engine knowing the fixture models, with no mapper defined yet.
#[must_use]
pub fn engine() -> Mappings {
    Mappings::builder()
        .model::<User>("user")
        .model::<Account>("account")
        .model::<Person>("person")
        .build()
}

/// [`engine`] with the default and `github` user mappers defined.
#[must_use]
pub fn user_engine() -> Mappings {
    let mappings = engine();
    mappings
        .define(|d| {
            d.mapper("user", |m| {
                m.field("name", "name");
                m.field("email", "user.email");
            });
            d.typed_mapper("user", "github", |m| {
                m.field("name", "login").transform_named("upcase");
                m.field("email", ["contact", "email"]);
                m.field("login_count", "stats.logins");
            });
        })
        .expect("fixture mappers are valid");
    mappings
}
