//! Table rendering for the author list

use authors_client::Author;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Render authors one per row, in the order given
pub fn authors_table<'a>(authors: impl IntoIterator<Item = &'a Author>) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "First", "Last", "Email"]);
    for author in authors {
        table.add_row(vec![
            author.id.to_string(),
            author.first.clone(),
            author.last.clone(),
            author.email.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_author() {
        let authors = vec![
            Author::new(1, "Sam", "Iam", "sam@aol.com"),
            Author::new(2, "Jane", "Doe", "jane@aol.com"),
        ];
        let rendered = authors_table(&authors).to_string();
        assert!(rendered.contains("Email"));
        assert!(rendered.contains("sam@aol.com"));
        assert!(rendered.contains("jane@aol.com"));
    }
}
