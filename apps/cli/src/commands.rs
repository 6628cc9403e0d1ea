use anyhow::{Context, Result, bail};
use h2m::domain::{MappingType, ModelId};
use h2m::mapping::{Mappings, Record};
use serde_json::{Map, Value, json};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

pub fn map(
    mappings: &Mappings,
    model: &str,
    mapping_type: Option<&str>,
    input: &Path,
    compact: bool,
    out: &mut impl Write,
) -> Result<()> {
    let document = read_input(input)?;
    let model = ModelId::from(model.to_owned());
    let mapping_type = MappingType::from(mapping_type.map(ToOwned::to_owned));

    debug!(%model, %mapping_type, input = %input.display(), "Mapping document");
    let record: Record = mappings
        .apply_as(model.clone(), mapping_type.clone(), &document)
        .with_context(|| format!("Failed to map `{model}` -> {mapping_type}"))?;

    let rendered =
        if compact { serde_json::to_string(&record)? } else { serde_json::to_string_pretty(&record)? };
    writeln!(out, "{rendered}")?;
    Ok(())
}

pub fn mappings(mappings: &Mappings, model: &str, out: &mut impl Write) -> Result<()> {
    let Some(typed) = mappings.defined_mappings_for(model.to_owned()) else {
        bail!("No mappers defined for `{model}`");
    };

    let mut types = Map::new();
    for (mapping_type, mapper) in &typed {
        let mut fields = Map::new();
        for (field, path, transformer) in mapper.iter() {
            let entry = match transformer {
                Some(transformer) => json!({ "path": path, "transform": transformer.name() }),
                None => json!({ "path": path }),
            };
            fields.insert(field.to_string(), entry);
        }
        types.insert(mapping_type.to_string(), Value::Object(fields));
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&Value::Object(types))?)?;
    Ok(())
}

pub fn fields(mappings: &Mappings, model: &str, out: &mut impl Write) -> Result<()> {
    let fields = mappings.defined_fields_for(model.to_owned());
    if fields.is_empty() {
        bail!("No fields defined for `{model}`");
    }
    for field in fields {
        writeln!(out, "{field}")?;
    }
    Ok(())
}

pub fn check(mappings: &Mappings, out: &mut impl Write) -> Result<()> {
    let registry = mappings.registry();
    let models = registry.models();

    for model in &models {
        let types: Vec<String> = registry
            .defined_mappings_for(model)
            .map(|typed| typed.keys().map(ToString::to_string).collect())
            .unwrap_or_default();
        writeln!(out, "{model}: {}", types.join(", "))?;
    }
    writeln!(out, "{} mappers for {} models", registry.len(), models.len())?;
    Ok(())
}

fn read_input(input: &Path) -> Result<Value> {
    let raw = if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?
    };
    serde_json::from_str(&raw).context("Input is not valid JSON")
}
