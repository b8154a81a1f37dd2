use tracing::debug;
use super::{sort_newest_first, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Tab if the header line contains one, comma otherwise.
    pub fn detect(first_line: &str) -> Self {
        if first_line.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn split_row(&self, line: &str) -> Vec<String> {
        match self {
            Delimiter::Tab => line.split('\t').map(|f| f.trim().to_string()).collect(),
            Delimiter::Comma => split_quoted(line),
        }
    }
}

/// Split a comma-separated line, treating commas inside double quotes as text.
///
/// Quote characters only toggle the quoted state and are never kept, so a
/// doubled `""` does not produce a literal quote.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn record_from_fields(mut fields: Vec<String>) -> Option<Record> {
    // positional: date, title, content, image, tags
    fields.resize(5, String::new());
    let mut fields = fields.into_iter();
    let date = fields.next()?;
    let title = fields.next()?;
    let content = fields.next()?;
    let image = fields.next().filter(|f| !f.is_empty());
    let tags = fields.next().filter(|f| !f.is_empty());

    if date.is_empty() || title.is_empty() || content.is_empty() {
        return None;
    }

    Some(Record { date, title, content, image, tags })
}

/// Parse rows in input order. The header row is skipped without validation.
pub fn parse_rows(text: &str) -> Vec<Record> {
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let delimiter = Delimiter::detect(header);
    let header_fields = delimiter.split_row(header);
    if !header_fields
        .first()
        .is_some_and(|h| h.eq_ignore_ascii_case("date"))
    {
        debug!("Unexpected header {:?}, mapping columns by position", header_fields);
    }

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match record_from_fields(delimiter.split_row(line)) {
            Some(record) => records.push(record),
            None => debug!("Dropping row {}: date, title and content are required", index + 1),
        }
    }

    records
}

/// Parse CSV or TSV text into records, newest first.
pub fn parse_delimited(text: &str) -> Vec<Record> {
    sort_newest_first(parse_rows(text), |r| r.date.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,title,content,image";

    #[test]
    fn quoted_comma_stays_in_one_field() {
        let records = parse_delimited(&format!("{HEADER}\n2024-01-01,\"Title, with comma\",Body"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Title, with comma");
        assert_eq!(records[0].content, "Body");
    }

    #[test]
    fn quotes_are_dropped_not_unescaped() {
        let fields = split_quoted(r#"a,"say ""hi""",c"#);
        assert_eq!(fields, vec!["a", "say hi", "c"]);
    }

    #[test]
    fn rows_missing_required_fields_are_dropped() {
        let text = format!(
            "{HEADER}\n2024-01-01,,Body\n2024-01-02,Title,\n,Title,Body\n2024-01-03,Kept,Body\n2024-01-04,Only title"
        );
        let records = parse_delimited(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn whitespace_is_trimmed_and_blank_lines_skipped() {
        let text = format!("{HEADER}\n\n  2024-01-01 ,  Hello  ,  World \n   \n");
        let records = parse_delimited(&text);
        assert_eq!(records, vec![Record::new("2024-01-01", "Hello", "World")]);
    }

    #[test]
    fn tab_delimited_input_is_detected() {
        let text = "date\ttitle\tcontent\timage\n2024-01-01\tA, b\tBody\t@https://example.org/a.png\n";
        let records = parse_delimited(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A, b");
        assert_eq!(records[0].image_url(), Some("https://example.org/a.png"));
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let records = parse_delimited("date,title,content\r\n2024-01-01,A,B\r\n");
        assert_eq!(records, vec![Record::new("2024-01-01", "A", "B")]);
    }

    #[test]
    fn optional_columns_are_read_positionally() {
        let text = "date,title,content,image,tags\n2024-01-01,A,B,,\"<#f00>Hot, Devlog\"\n";
        let records = parse_delimited(text);
        assert_eq!(records[0].image, None);
        assert_eq!(records[0].tags.as_deref(), Some("<#f00>Hot, Devlog"));
        assert_eq!(records[0].parsed_tags().len(), 2);
    }

    #[test]
    fn header_names_are_not_validated() {
        let records = parse_delimited("when,what,why\n2024-01-01,A,B\n");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn output_is_sorted_newest_first() {
        let text = format!("{HEADER}\n2024-01-01,Old,x\n2024-06-01,New,x\n2024-03-01,Mid,x");
        let titles: Vec<String> = parse_delimited(&text).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_delimited("").is_empty());
        assert!(parse_delimited(HEADER).is_empty());
    }
}
