use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a report for stdout.
///
/// `Json` is pretty-printed; `Raw` is one compact line.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Raw => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

/// Print a report to stdout.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Sample {
        instances: u32,
    }

    #[test]
    fn raw_is_compact() {
        let rendered = render(&Sample { instances: 2 }, OutputFormat::Raw).expect("render");
        assert_eq!(rendered, r#"{"instances":2}"#);
    }

    #[test]
    fn json_is_pretty() {
        let rendered = render(&Sample { instances: 2 }, OutputFormat::Json).expect("render");
        assert_eq!(rendered, "{\n  \"instances\": 2\n}");
    }
}
