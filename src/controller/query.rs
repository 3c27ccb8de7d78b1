use serde::{Deserialize, Serialize};
use url::form_urlencoded;

const SEARCH_MODE_KEY: &str = "selectedSearchMode";
const ALERT_ID_KEY: &str = "alertId";

/// Query parameters the alert list shares with the routing layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_search_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<i64>,
}

impl QueryParams {
    /// Parses a query string (without the leading `?`), ignoring unknown keys
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SEARCH_MODE_KEY => params.selected_search_mode = Some(value.into_owned()),
                ALERT_ID_KEY => match value.parse() {
                    Ok(id) => params.alert_id = Some(id),
                    Err(_) => log::warn!("Ignoring invalid alertId query parameter: {}", value),
                },
                _ => {}
            }
        }
        params
    }

    /// Encodes the set parameters as a query string
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(mode) = &self.selected_search_mode {
            serializer.append_pair(SEARCH_MODE_KEY, mode);
        }
        if let Some(id) = self.alert_id {
            serializer.append_pair(ALERT_ID_KEY, &id.to_string());
        }
        serializer.finish()
    }
}
