use h2m_mapping::{Model, Value};

#[derive(Debug, Default, Model)]
#[model(name = "Customer")]
pub struct Client {
    #[model(rename = "full_name")]
    name: Option<String>,
    tags: Vec<String>,
    #[model(skip)]
    cache: Option<Value>,
    #[model(read_only)]
    frozen: bool,
}

fn main() {
    let mut client = Client::default();
    client.mark_read_only();
    let _ = client.set_field("full_name", Value::from("Ada"));
    let _: &dyn Model = &client;
}
