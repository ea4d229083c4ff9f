/// Split a single CSV line into its fields.
///
/// A double-quoted field may contain commas, and `""` inside quotes yields one
/// literal quote. Quotes that never close simply leave the rest of the line in
/// quote mode. The final field is always emitted, so `a,` gives `["a", ""]`.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
