// ============================================================================
// CSV - Minimal reader for student roster uploads
// ============================================================================

/// Splits one CSV record, honouring double quotes and `""` escapes
pub fn parse_csv_record(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                buf.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => out.push(std::mem::take(&mut buf)),
            _ => buf.push(ch),
        }
    }
    out.push(buf);
    out
}

/// First column of every non-blank record, in file order. No header row is
/// assumed: whatever sits in the first line is a name too.
pub fn first_column(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            parse_csv_record(line)
                .into_iter()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_quotes_and_escapes() {
        assert_eq!(
            parse_csv_record(r#""Shrestha, Ram",10,"say ""hi""""#),
            vec!["Shrestha, Ram", "10", r#"say "hi""#]
        );
        assert_eq!(parse_csv_record(""), vec![""]);
    }

    #[test]
    fn first_column_skips_blank_lines_and_bom() {
        let text = "\u{feff}Bob,grade 3\r\nCarol\n\n  \n\"Thapa, Sita\",x\n";
        assert_eq!(first_column(text), vec!["Bob", "Carol", "Thapa, Sita"]);
    }

    #[test]
    fn empty_first_cell_is_kept_as_blank_name() {
        assert_eq!(first_column(",only second\nDipa"), vec!["", "Dipa"]);
    }
}
