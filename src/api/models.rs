// src/api/models.rs
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

// Sections of the analytics payloads are decoded independently: a section that
// fails to decode becomes `None` instead of failing the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(section) => Ok(Some(section)),
        Err(e) => {
            tracing::debug!("Dropping malformed payload section: {}", e);
            Ok(None)
        }
    }
}

// Same idea for lists: keep the entries that decode, skip the rest.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_items(deserializer)?.unwrap_or_default())
}

// Product and customer names come straight from dataset columns, so numeric
// SKUs and customer ids arrive as JSON numbers.
fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a name or id, got {}", other))),
    }
}

/// Serialized Plotly figure, passed through to the chart renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSpec(pub String);

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report: ReportSummary,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub personalized: Vec<String>,
    #[serde(default)]
    pub cleaning: CleaningCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSummary {
    pub title: String,
    pub summary: String,
    pub total_revenue: String,
    #[serde(deserialize_with = "identifier")]
    pub top_product: String,
    pub data_quality: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningCounts {
    pub missing_values: u64,
    pub duplicates: u64,
    pub outliers: u64,
}

impl CleaningCounts {
    pub fn issues_found(&self) -> u64 {
        self.missing_values + self.duplicates + self.outliers
    }
}

// ---------------------------------------------------------------------------
// Growth analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthAnalytics {
    #[serde(default, deserialize_with = "lenient")]
    pub revenue_prediction: Option<RevenuePrediction>,
    #[serde(default, deserialize_with = "lenient")]
    pub top_products: Option<TopProducts>,
    #[serde(default, deserialize_with = "lenient")]
    pub best_times: Option<BestTimes>,
    #[serde(default, deserialize_with = "lenient")]
    pub missed_opportunities: Option<MissedOpportunities>,
    #[serde(default, deserialize_with = "lenient")]
    pub data_quality: Option<DataQuality>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub product_lifecycle: Option<Vec<LifecycleEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub seasonality: Option<Seasonality>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub anomalies: Option<Vec<Anomaly>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub recommendations: Option<Vec<Recommendation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePrediction {
    pub growth_rate: f64,
    #[serde(default)]
    pub next_month_revenue: Option<f64>,
    #[serde(default)]
    pub prediction_accuracy: Option<String>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProducts {
    #[serde(default, deserialize_with = "items")]
    pub products: Vec<ProductSales>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    #[serde(deserialize_with = "identifier")]
    pub product: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTimes {
    #[serde(default)]
    pub best_day: Option<String>,
    #[serde(default)]
    pub best_hour: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissedOpportunities {
    #[serde(default, deserialize_with = "items")]
    pub opportunities: Vec<MissedOpportunity>,
    #[serde(default)]
    pub total_missed_revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissedOpportunity {
    #[serde(deserialize_with = "identifier")]
    pub product: String,
    #[serde(default)]
    pub missed_sales: Option<u64>,
    #[serde(default)]
    pub potential_revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub quality_score: f64,
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default)]
    pub missing_values: Option<u64>,
    #[serde(default)]
    pub duplicates: Option<u64>,
    #[serde(default)]
    pub zero_prices: Option<u64>,
    #[serde(default)]
    pub negative_quantities: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Launch,
    Growth,
    Mature,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEntry {
    #[serde(deserialize_with = "identifier")]
    pub product: String,
    pub stage: LifecycleStage,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    #[serde(default)]
    pub peak_day: Option<String>,
    #[serde(default)]
    pub low_day: Option<String>,
    /// Ratio of spread to mean across weekdays, 0.35 meaning 35%.
    #[serde(default)]
    pub seasonality_strength: Option<f64>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(deserialize_with = "identifier")]
    pub product: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub value: f64,
    #[serde(default)]
    pub deviation_percent: Option<f64>,
    #[serde(default)]
    pub expected_range: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(rename = "recommendation")]
    pub body: String,
    pub impact: Impact,
    #[serde(default)]
    pub icon: Option<String>,
}

// ---------------------------------------------------------------------------
// Advanced analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalytics {
    #[serde(default, deserialize_with = "lenient")]
    pub data_health: Option<DataHealth>,
    #[serde(default, deserialize_with = "lenient")]
    pub growth_metrics: Option<GrowthMetrics>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer_segmentation: Option<CustomerSegmentation>,
    #[serde(default, deserialize_with = "lenient")]
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataHealth {
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub stats: Option<HealthStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    pub total_rows: u64,
    pub total_columns: u64,
    pub missing_pct: f64,
    pub duplicate_pct: f64,
    pub outlier_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    #[serde(rename = "wow_growth")]
    pub week_over_week: f64,
    #[serde(rename = "mom_growth")]
    pub month_over_month: f64,
    #[serde(rename = "best_streak", default)]
    pub best_streak_value: Option<f64>,
    #[serde(default)]
    pub best_streak_date: Option<String>,
    #[serde(rename = "sparkline", default)]
    pub sparkline_series: Vec<f64>,
    #[serde(default)]
    pub current_revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegmentation {
    #[serde(default, deserialize_with = "items")]
    pub segments: Vec<CustomerSegment>,
    #[serde(default, deserialize_with = "items")]
    pub sample_customers: Vec<SampleCustomer>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    #[serde(rename = "segment")]
    pub name: String,
    pub count: u64,
    pub avg_revenue: f64,
    pub avg_frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCustomer {
    #[serde(deserialize_with = "identifier")]
    pub customer: String,
    pub total_revenue: f64,
    pub frequency: f64,
    #[serde(default)]
    pub segment_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub summary: String,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
}

// ---------------------------------------------------------------------------
// Delivery and chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryChannel {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "slack")]
    ChatChannel,
}

impl DeliveryChannel {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryChannel::Email => "Email",
            DeliveryChannel::ChatChannel => "Chat channel",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendReportRequest<'a> {
    pub method: DeliveryChannel,
    pub recipient: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExploreRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_wire_shape() {
        let report: Report = serde_json::from_value(json!({
            "report": {
                "title": "Sales Performance Analysis",
                "summary": "Analysis of 250 sales records",
                "total_revenue": "$12,400.00",
                "top_product": "Laptop",
                "data_quality": "Good"
            },
            "insights": ["Your dataset contains 250 sales transactions"],
            "cleaning": {"missing_values": 3, "duplicates": 1, "outliers": 4, "data_types": "Optimized for analysis"},
            "personalized": ["Customer segmentation could reveal valuable insights"]
        }))
        .unwrap();

        assert_eq!(report.report.top_product, "Laptop");
        assert_eq!(report.cleaning.issues_found(), 8);
        assert_eq!(report.personalized.len(), 1);
    }

    #[test]
    fn test_malformed_growth_section_does_not_poison_siblings() {
        let growth: GrowthAnalytics = serde_json::from_value(json!({
            "revenue_prediction": {"growth_rate": "not a number"},
            "data_quality": {"quality_score": 94.0, "total_rows": 100},
            "missed_opportunities": {"opportunities": [], "total_missed_revenue": 0.0, "count": 0}
        }))
        .unwrap();

        assert!(growth.revenue_prediction.is_none());
        assert_eq!(growth.data_quality.unwrap().quality_score, 94.0);
        assert!(growth.missed_opportunities.unwrap().opportunities.is_empty());
        assert!(growth.anomalies.is_none());
    }

    #[test]
    fn test_bad_list_entries_are_skipped() {
        let growth: GrowthAnalytics = serde_json::from_value(json!({
            "product_lifecycle": [
                {"product": "Laptop", "stage": "Mature", "confidence": "High", "trend_value": 0.05, "total_revenue": 12000},
                {"product": "Mouse", "stage": "Sideways"}
            ],
            "anomalies": [
                {"product": "Gaming Mouse", "type": "spike", "severity": "medium", "value": 250.0,
                 "expected_range": "$80.00 - $150.00", "deviation_percent": 85.0}
            ]
        }))
        .unwrap();

        let lifecycle = growth.product_lifecycle.unwrap();
        assert_eq!(lifecycle.len(), 1);
        assert_eq!(lifecycle[0].stage, LifecycleStage::Mature);
        assert_eq!(growth.anomalies.unwrap()[0].kind, AnomalyKind::Spike);
    }

    #[test]
    fn test_numeric_identifiers_keep_sections() {
        let growth: GrowthAnalytics = serde_json::from_value(json!({
            "top_products": {"products": [
                {"product": 5012, "revenue": 900.0},
                {"product": "Mouse", "revenue": 120.0},
                {"product": null, "revenue": 5.0}
            ]},
            "missed_opportunities": {"opportunities": [{"product": 7, "missed_sales": 3}]},
            "anomalies": [{"product": 5012, "type": "drop", "severity": "low", "value": 2.0}]
        }))
        .unwrap();

        let products = growth.top_products.unwrap().products;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product, "5012");
        assert_eq!(growth.missed_opportunities.unwrap().opportunities[0].product, "7");
        assert_eq!(growth.anomalies.unwrap()[0].product, "5012");

        let advanced: AdvancedAnalytics = serde_json::from_value(json!({
            "customer_segmentation": {
                "segments": [{"segment": "High Value", "count": 2, "avg_revenue": 800.0, "avg_frequency": 4.0}],
                "sample_customers": [
                    {"customer": 1001, "total_revenue": 950.5, "frequency": 5, "segment_name": "High Value"},
                    {"customer": "C-2", "total_revenue": 40.0, "frequency": 1}
                ]
            }
        }))
        .unwrap();

        let segmentation = advanced.customer_segmentation.unwrap();
        assert_eq!(segmentation.segments.len(), 1);
        assert_eq!(segmentation.sample_customers[0].customer, "1001");
        assert_eq!(segmentation.sample_customers[1].customer, "C-2");

        let summary: ReportSummary = serde_json::from_value(json!({"title": "Sales", "top_product": 42})).unwrap();
        assert_eq!(summary.top_product, "42");
    }

    #[test]
    fn test_send_report_request_uses_wire_channel_names() {
        let body = serde_json::to_value(SendReportRequest {
            method: DeliveryChannel::ChatChannel,
            recipient: "#general",
        })
        .unwrap();
        assert_eq!(body, json!({"method": "slack", "recipient": "#general"}));
    }
}
