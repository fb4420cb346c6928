use std::sync::LazyLock;

use regex::Regex;

use crate::errors::DashError;

/// Strings from the config end up on the terminal, so reject markup and raw
/// control sequences outright.
static UNSAFE_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(<\s*script|javascript:|vbscript:|\x1b|[\x00-\x08\x0b\x0c\x0e-\x1f\x7f])")
        .expect("unsafe content pattern is valid")
});

pub fn validate_content(value: &serde_yaml::Value) -> Result<(), DashError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), DashError> {
    match value {
        serde_yaml::Value::String(s) => {
            if let Some(found) = UNSAFE_CONTENT.find(s) {
                let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
                return Err(DashError::Config(format!(
                    "Unsafe content {:?} found at config path: {}",
                    found.as_str(),
                    path_str
                )));
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
