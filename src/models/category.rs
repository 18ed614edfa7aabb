use serde::{Deserialize, Serialize};

// One service offered under a category, as supplied by the import payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceImportItem {
    pub name: String,
    pub duration: i64, // minutes
    #[serde(default)]
    pub price: Option<f64>,
}

// One category in the bulk-import payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryImportItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceImportItem>,
}

// Request body for the category import endpoint
#[derive(Debug, Deserialize)]
pub struct CategoryImportRequest {
    pub categories: Vec<CategoryImportItem>,
}

// Summary returned after a bulk import
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryImportSummary {
    pub success: bool,
    pub inserted: usize,
    pub updated: usize,
}
