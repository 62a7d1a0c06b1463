use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Sort direction for `order`.
#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Builder for one read against a PostgREST collection.
///
/// Parameters accumulate in call order, so the same input always renders
/// the same querystring.
pub struct QueryBuilder {
    http: reqwest::Client,
    url: String,
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub(crate) fn new(http: reqwest::Client, rest_base: &str, collection: &str) -> QueryBuilder {
        QueryBuilder {
            http,
            url: format!("{}/{}", rest_base, collection),
            params: vec![("select".to_string(), "*".to_string())],
        }
    }

    pub fn eq(mut self, column: &str, value: &str) -> QueryBuilder {
        self.params
            .push((column.to_string(), format!("eq.{}", escape_operand(value))));
        self
    }

    pub fn gte(mut self, column: &str, value: i64) -> QueryBuilder {
        self.params
            .push((column.to_string(), format!("gte.{}", value)));
        self
    }

    pub fn lte(mut self, column: &str, value: i64) -> QueryBuilder {
        self.params
            .push((column.to_string(), format!("lte.{}", value)));
        self
    }

    /// Case-insensitive unanchored substring match against any of
    /// `columns`, rendered as a single `or=(...)` parameter.
    pub fn or_ilike_any(mut self, columns: &[&str], text: &str) -> QueryBuilder {
        let pattern = format!("*{}*", escape_operand(text));
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("{}.ilike.{}", column, pattern))
            .collect();
        self.params
            .push(("or".to_string(), format!("({})", alternatives.join(","))));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> QueryBuilder {
        self.params.push((
            "order".to_string(),
            format!("{}.{}", column, direction.suffix()),
        ));
        self
    }

    pub fn limit(mut self, count: u32) -> QueryBuilder {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    /// The accumulated parameters rendered as an unencoded querystring.
    pub fn querystring(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self
            .http
            .get(&self.url)
            .query(&self.params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "store returned {} for {}: {}",
                status,
                self.url,
                snippet(&body)
            ));
        }

        Ok(response.json::<Vec<T>>().await?)
    }
}

// The filter grammar gives `,`, `(` and `)` structural meaning inside
// operands; user text never legitimately needs them for these columns.
fn escape_operand(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(*c, ',' | '(' | ')'))
        .collect()
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
