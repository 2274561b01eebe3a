//! HTML rendering.
//!
//! Each [`Page`] variant is one screen of the admin. [`render`] wraps it in
//! the shared layout, which carries the navigation bar and pending flash
//! messages. Every piece of dynamic text passes through [`escape`].

use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::flash::Flash;
use crate::application::{TableSummary, TableView};
use crate::domain::record::display_value;
use crate::domain::{Affinity, ColumnSchema, FieldHooks, FormFields, Record, TableName, TableSchema};

/// Layout data shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    /// Logged-in username, if any.
    pub user: Option<String>,
    pub flashes: Vec<Flash>,
}

impl Chrome {
    #[must_use]
    pub fn new(user: Option<String>, flashes: Vec<Flash>) -> Self {
        Self { user, flashes }
    }

    pub fn push(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Edit { id: String },
}

/// Create or edit form for one table.
#[derive(Debug)]
pub struct FormView<'a> {
    pub table: &'a TableName,
    pub schema: &'a TableSchema,
    pub hooks: &'a FieldHooks,
    pub action: FormAction,
    /// Values to prefill, keyed by column name.
    pub values: FormFields,
}

impl<'a> FormView<'a> {
    /// Prefill an edit form from a stored record. Hashed fields start blank.
    #[must_use]
    pub fn from_record(
        table: &'a TableName,
        schema: &'a TableSchema,
        hooks: &'a FieldHooks,
        id: &str,
        record: &Record,
    ) -> Self {
        let values = record
            .iter()
            .filter(|(column, _)| !hooks.is_hashed(table, column))
            .map(|(column, value)| (column.to_string(), display_value(value)))
            .collect();
        Self {
            table,
            schema,
            hooks,
            action: FormAction::Edit { id: id.to_string() },
            values,
        }
    }
}

#[derive(Debug)]
pub enum Page<'a> {
    Home,
    Login { username: &'a str },
    Register { username: &'a str },
    TableIndex(&'a [TableSummary]),
    Table(&'a TableView),
    Form(FormView<'a>),
    Error { status: u16, message: &'a str },
}

impl Page<'_> {
    fn title(&self) -> String {
        match self {
            Self::Home => "Trading Admin".into(),
            Self::Login { .. } => "Log In".into(),
            Self::Register { .. } => "Register".into(),
            Self::TableIndex(_) => "Tables".into(),
            Self::Table(view) => view.table.to_string(),
            Self::Form(form) => match form.action {
                FormAction::Create => format!("New {} record", form.table),
                FormAction::Edit { .. } => format!("Edit {} record", form.table),
            },
            Self::Error { status, .. } => format!("Error {status}"),
        }
    }
}

/// Render a full HTML document.
#[must_use]
pub fn render(page: &Page<'_>, chrome: &Chrome) -> String {
    let mut html = String::with_capacity(4096);
    let title = escape(&page.title());

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title} - Trading Admin</title>");
    html.push_str("</head>\n<body>\n");
    nav(&mut html, chrome);
    html.push_str("<main>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    flashes(&mut html, &chrome.flashes);

    match page {
        Page::Home => home(&mut html, chrome),
        Page::Login { username } => credentials(&mut html, "/auth/login", "Log In", username),
        Page::Register { username } => {
            credentials(&mut html, "/auth/register", "Register", username);
        }
        Page::TableIndex(tables) => table_index(&mut html, tables),
        Page::Table(view) => table(&mut html, view),
        Page::Form(form) => record_form(&mut html, form),
        Page::Error { message, .. } => {
            let _ = writeln!(html, "<p>{}</p>", escape(message));
            html.push_str("<p><a href=\"/\">Home</a></p>\n");
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn nav(html: &mut String, chrome: &Chrome) {
    html.push_str("<nav>\n<a href=\"/\">Trading Admin</a>\n");
    match &chrome.user {
        Some(user) => {
            html.push_str("<a href=\"/tables/\">Tables</a>\n");
            let _ = writeln!(html, "<span>{}</span>", escape(user));
            html.push_str("<a href=\"/auth/logout\">Log Out</a>\n");
        }
        None => {
            html.push_str("<a href=\"/auth/register\">Register</a>\n");
            html.push_str("<a href=\"/auth/login\">Log In</a>\n");
        }
    }
    html.push_str("</nav>\n");
}

fn flashes(html: &mut String, flashes: &[Flash]) {
    for flash in flashes {
        let _ = writeln!(
            html,
            "<div class=\"flash {}\">{}</div>",
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
}

fn home(html: &mut String, chrome: &Chrome) {
    if chrome.user.is_some() {
        html.push_str("<p><a href=\"/tables/\">Browse tables</a></p>\n");
    } else {
        html.push_str("<p>Log in to manage the trading database.</p>\n");
    }
}

fn credentials(html: &mut String, action: &str, submit: &str, username: &str) {
    let _ = writeln!(html, "<form method=\"post\" action=\"{action}\">");
    let _ = writeln!(
        html,
        "<label for=\"username\">Username</label>\n\
         <input name=\"username\" id=\"username\" value=\"{}\" required>",
        escape(username)
    );
    html.push_str(
        "<label for=\"password\">Password</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n",
    );
    let _ = writeln!(html, "<input type=\"submit\" value=\"{submit}\">\n</form>");
}

fn table_index(html: &mut String, tables: &[TableSummary]) {
    html.push_str("<table>\n<tr><th>Table</th><th>Rows</th></tr>\n");
    for summary in tables {
        let _ = writeln!(
            html,
            "<tr><td><a href=\"/tables/{}\">{}</a></td><td>{}</td></tr>",
            encode_segment(summary.name.as_str()),
            escape(summary.name.as_str()),
            summary.row_count
        );
    }
    html.push_str("</table>\n");
}

fn table(html: &mut String, view: &TableView) {
    let base = format!("/tables/{}", encode_segment(view.table.as_str()));
    let _ = writeln!(html, "<p><a href=\"{base}/create\">New record</a></p>");

    html.push_str("<table>\n<tr>");
    for column in &view.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    if view.primary_key.is_some() {
        html.push_str("<th></th>");
    }
    html.push_str("</tr>\n");

    if view.rows.is_empty() {
        let span = view.columns.len() + usize::from(view.primary_key.is_some());
        let _ = writeln!(html, "<tr><td colspan=\"{span}\">No records.</td></tr>");
    }

    for row in &view.rows {
        html.push_str("<tr>");
        for column in &view.columns {
            let _ = write!(html, "<td>{}</td>", escape(&row.display(column)));
        }
        if let Some(key) = &view.primary_key {
            let id = encode_segment(&row.display(key));
            let _ = write!(
                html,
                "<td><a href=\"{base}/edit/{id}\">Edit</a> \
                 <form method=\"post\" action=\"{base}/delete/{id}\">\
                 <input type=\"submit\" value=\"Delete\"></form></td>"
            );
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn record_form(html: &mut String, form: &FormView<'_>) {
    let base = format!("/tables/{}", encode_segment(form.table.as_str()));
    let action = match &form.action {
        FormAction::Create => format!("{base}/create"),
        FormAction::Edit { id } => format!("{base}/edit/{}", encode_segment(id)),
    };
    let editing = matches!(form.action, FormAction::Edit { .. });

    let _ = writeln!(html, "<form method=\"post\" action=\"{action}\">");
    for column in form.schema.columns().iter().filter(|c| !c.primary_key) {
        let hashed = form.hooks.is_hashed(form.table, &column.name);
        // A blank hashed field on edit keeps the stored value.
        let required = column.not_null && !(editing && hashed);
        field(html, column, form.values.get(&column.name).unwrap_or(""), hashed, required);
        if editing && hashed {
            html.push_str("<small>Leave blank to keep the current value.</small>\n");
        }
    }
    let submit = if editing { "Save" } else { "Create" };
    let _ = writeln!(html, "<input type=\"submit\" value=\"{submit}\">\n</form>");
    let _ = writeln!(html, "<p><a href=\"{base}\">Back to {}</a></p>", escape(form.table.as_str()));
}

fn field(html: &mut String, column: &ColumnSchema, value: &str, hashed: bool, required: bool) {
    let name = escape(&column.name);
    let marker = if required { " *" } else { "" };
    let _ = writeln!(html, "<label for=\"{name}\">{name}{marker}</label>");

    let kind = input_type(column, hashed);
    let _ = write!(html, "<input type=\"{kind}\" name=\"{name}\" id=\"{name}\"");
    if kind == "number" {
        html.push_str(" step=\"any\"");
    }
    if !hashed {
        let _ = write!(html, " value=\"{}\"", escape(value));
    }
    if required {
        html.push_str(" required");
    }
    html.push_str(">\n");
}

fn input_type(column: &ColumnSchema, hashed: bool) -> &'static str {
    if hashed {
        "password"
    } else if matches!(column.affinity(), Affinity::Integer | Affinity::Real) {
        "number"
    } else {
        "text"
    }
}

/// Escape text for HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single URL path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::tests::{column, stocks};
    use crate::domain::{AllowList, FieldRule};
    use serde_json::json;

    fn stocks_name() -> TableName {
        AllowList::new(["Stocks"]).resolve("Stocks").cloned().unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(encode_segment("AAPL"), "AAPL");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("x-y_z.1~"), "x-y_z.1~");
        assert_eq!(encode_segment("é?"), "%C3%A9%3F");
    }

    #[test]
    fn empty_table_still_has_header() {
        let view = TableView {
            table: stocks_name(),
            columns: vec!["id".into(), "symbol".into()],
            rows: Vec::new(),
            primary_key: Some("id".into()),
        };
        let html = render(&Page::Table(&view), &Chrome::default());

        assert!(html.contains("<th>id</th><th>symbol</th>"));
        assert!(html.contains("No records."));
    }

    #[test]
    fn rows_link_to_edit_and_delete() {
        let row = Record::from_columns(
            &["id".into(), "symbol".into()],
            vec![json!(3), json!("<b>")],
        );
        let view = TableView {
            table: stocks_name(),
            columns: vec!["id".into(), "symbol".into()],
            rows: vec![row],
            primary_key: Some("id".into()),
        };
        let html = render(&Page::Table(&view), &Chrome::default());

        assert!(html.contains("<td>&lt;b&gt;</td>"));
        assert!(html.contains("href=\"/tables/Stocks/edit/3\""));
        assert!(html.contains("action=\"/tables/Stocks/delete/3\""));
    }

    #[test]
    fn keyless_table_has_no_row_actions() {
        let view = TableView {
            table: stocks_name(),
            columns: vec!["symbol".into()],
            rows: vec![Record::from_columns(&["symbol".into()], vec![json!("X")])],
            primary_key: None,
        };
        let html = render(&Page::Table(&view), &Chrome::default());
        assert!(!html.contains("/edit/"));
    }

    #[test]
    fn form_marks_required_fields_and_skips_key() {
        let table = stocks_name();
        let schema = stocks();
        let hooks = FieldHooks::new();
        let form = FormView {
            table: &table,
            schema: &schema,
            hooks: &hooks,
            action: FormAction::Create,
            values: FormFields::new(),
        };
        let html = render(&Page::Form(form), &Chrome::default());

        assert!(!html.contains("name=\"id\""));
        assert!(html.contains("<label for=\"symbol\">symbol *</label>"));
        assert!(html.contains("<label for=\"name\">name</label>"));
        assert!(html.contains("action=\"/tables/Stocks/create\""));
    }

    #[test]
    fn input_types_follow_column_kind() {
        let table = AllowList::new(["Traders"]).resolve("Traders").cloned().unwrap();
        let schema = TableSchema::new(vec![
            column(0, "TraderID", "INTEGER", false, true),
            column(1, "Balance", "REAL", true, false),
            column(2, "Password", "TEXT", true, false),
            column(3, "Name", "TEXT", true, false),
        ]);
        let hooks = FieldHooks::new().with_rule("Traders", "Password", FieldRule::Hashed);
        let record = Record::from_columns(
            &["TraderID".into(), "Balance".into(), "Password".into(), "Name".into()],
            vec![json!(1), json!(10.5), json!("$2b$hash"), json!("Ann")],
        );
        let form = FormView::from_record(&table, &schema, &hooks, "1", &record);
        let html = render(&Page::Form(form), &Chrome::default());

        assert!(html.contains("type=\"number\" name=\"Balance\""));
        assert!(html.contains("value=\"10.5\""));
        assert!(html.contains("type=\"password\" name=\"Password\" id=\"Password\">"));
        assert!(!html.contains("$2b$hash"));
        assert!(html.contains("type=\"text\" name=\"Name\""));
        assert!(html.contains("action=\"/tables/Traders/edit/1\""));
    }

    #[test]
    fn chrome_shows_user_and_flashes() {
        let chrome = Chrome::new(
            Some("alice".into()),
            vec![Flash::error("FOREIGN KEY constraint failed")],
        );
        let html = render(&Page::Home, &chrome);

        assert!(html.contains("<span>alice</span>"));
        assert!(html.contains("/auth/logout"));
        assert!(html.contains("<div class=\"flash error\">FOREIGN KEY constraint failed</div>"));
    }
}
