use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{SourceError, TxSource};
use crate::core::Transaction;

/// An Etherscan-shaped explorer API: `?module=account&action=txlist` returns
/// `{status, message, result}` where `result` is an array of transactions on
/// success and an error string otherwise. Blockscout and BaseScan both speak
/// this dialect, so one adapter covers the whole fallback chain.
pub struct ExplorerSource {
    name: String,
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    result: Value,
}

/// Wire shape of one transaction entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: String,
    from: String,
    #[serde(default)]
    to: String,
    value: String,
    input: String,
    time_stamp: String,
}

/// Per-source timeout. A slow source is a failed source; the fallback chain
/// moves on, so worst-case latency is bounded by the sum of these.
const SOURCE_TIMEOUT_SECS: u64 = 10;

impl ExplorerSource {
    pub fn new(name: &str, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            // Placeholder keys from config templates are as good as no key.
            api_key: api_key.filter(|k| k.len() > 10 && k != "YourApiKeyToken"),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(SOURCE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    fn request_url(&self, address: &str) -> String {
        let mut url = format!(
            "{}?module=account&action=txlist&address={address}&startblock=0&endblock=99999999&sort=desc",
            self.base_url
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&apikey={key}"));
        }
        url
    }
}

#[async_trait]
impl TxSource for ExplorerSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, address: &str, since: i64) -> Result<Vec<Transaction>, SourceError> {
        let response = self
            .client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(SourceError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        parse_result(body, since)
    }
}

/// Convert the explorer envelope into filtered, normalized transactions.
/// A status other than "1" means "no data" (the APIs use it for empty result
/// sets too), which the fallback chain treats as an empty list.
fn parse_result(body: ExplorerResponse, since: i64) -> Result<Vec<Transaction>, SourceError> {
    if body.status != "1" {
        return Ok(Vec::new());
    }

    let entries: Vec<RawTransaction> = serde_json::from_value(body.result)
        .map_err(|e| SourceError::Malformed(e.to_string()))?;

    let txs = entries
        .into_iter()
        .filter_map(|raw| {
            // Entries with an unparsable timestamp are dropped, not fatal.
            let timestamp = raw.time_stamp.parse::<i64>().ok()?;
            Some(Transaction {
                hash: raw.hash,
                from: raw.from,
                to: (!raw.to.is_empty()).then_some(raw.to),
                value: raw.value,
                input: raw.input,
                timestamp,
            })
        })
        .filter(|tx| tx.timestamp >= since)
        .collect();

    Ok(txs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(result: Value) -> ExplorerResponse {
        serde_json::from_value(json!({
            "status": "1",
            "message": "OK",
            "result": result,
        }))
        .unwrap()
    }

    fn entry(hash: &str, timestamp: i64) -> Value {
        json!({
            "hash": hash,
            "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "to": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "value": "0",
            "input": "0x095ea7b3",
            "timeStamp": timestamp.to_string(),
        })
    }

    #[test]
    fn parses_and_filters_by_timestamp() {
        let body = envelope(json!([entry("0x1", 2_000), entry("0x2", 500)]));
        let txs = parse_result(body, 1_000).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].hash, "0x1");
        assert_eq!(txs[0].timestamp, 2_000);
        assert_eq!(txs[0].input, "0x095ea7b3");
    }

    #[test]
    fn empty_to_becomes_none() {
        let mut e = entry("0x1", 2_000);
        e["to"] = json!("");
        let txs = parse_result(envelope(json!([e])), 0).unwrap();
        assert_eq!(txs[0].to, None);
    }

    #[test]
    fn missing_to_becomes_none() {
        let mut e = entry("0x1", 2_000);
        e.as_object_mut().unwrap().remove("to");
        let txs = parse_result(envelope(json!([e])), 0).unwrap();
        assert_eq!(txs[0].to, None);
    }

    #[test]
    fn zero_status_is_empty_not_error() {
        let body: ExplorerResponse = serde_json::from_value(json!({
            "status": "0",
            "message": "No transactions found",
            "result": [],
        }))
        .unwrap();
        assert!(parse_result(body, 0).unwrap().is_empty());
    }

    #[test]
    fn string_result_is_malformed() {
        let body = envelope(json!("Max rate limit reached"));
        assert!(matches!(
            parse_result(body, 0),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn unparsable_timestamp_entry_is_dropped() {
        let mut bad = entry("0xbad", 2_000);
        bad["timeStamp"] = json!("not-a-number");
        let body = envelope(json!([entry("0x1", 2_000), bad]));
        let txs = parse_result(body, 0).unwrap();
        assert_eq!(txs.len(), 1);
    }

    #[test]
    fn api_key_appended_only_when_real() {
        let keyed = ExplorerSource::new(
            "BaseScan",
            "https://api.basescan.org/api",
            Some("abcdef1234567890".into()),
        );
        assert!(keyed.request_url("0x1").contains("&apikey=abcdef1234567890"));

        let placeholder = ExplorerSource::new(
            "BaseScan",
            "https://api.basescan.org/api",
            Some("YourApiKeyToken".into()),
        );
        assert!(!placeholder.request_url("0x1").contains("apikey"));

        let keyless = ExplorerSource::new("Blockscout", "https://base.blockscout.com/api", None);
        let url = keyless.request_url("0x1");
        assert!(url.starts_with("https://base.blockscout.com/api?module=account&action=txlist"));
        assert!(!url.contains("apikey"));
    }
}
