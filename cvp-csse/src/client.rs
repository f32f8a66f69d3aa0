//! Native HTTP client for the JHU CSSE time series repository.
//!
//! Compiled only with the `api` feature so the WASM dashboard never links
//! reqwest/tokio. Fetches are single-attempt; a failure propagates to the
//! caller as a [`FetchError`].

use crate::case_set::CaseSet;
use crate::case_table::{CaseTable, FetchError};
use crate::category::Category;
use log::{info, warn};
use reqwest::{Client, StatusCode};

/// Base URL of the curated JHU CSSE daily-report time series.
pub const TIME_SERIES_BASE: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

/// Remote CSV URL for one category's global time series.
pub fn category_url(category: Category) -> String {
    let file = match category {
        Category::Confirmed => "time_series_covid19_confirmed_global.csv",
        Category::Deaths => "time_series_covid19_deaths_global.csv",
        Category::Recovered => "time_series_covid19_recovered_global.csv",
    };
    format!("{}/{}", TIME_SERIES_BASE, file)
}

/// Fetch one category's raw CSV body.
pub async fn fetch_category_csv(client: &Client, category: Category) -> Result<String, FetchError> {
    let url = category_url(category);
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;
    if response.status() != StatusCode::OK {
        warn!(
            "Bad response status for {}: {}",
            category.label(),
            response.status()
        );
        return Err(FetchError::Http(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;
    if body.len() <= 2 {
        return Err(FetchError::EmptyResponse);
    }
    Ok(body)
}

async fn fetch_table(client: &Client, category: Category) -> Result<CaseTable, FetchError> {
    let body = fetch_category_csv(client, category).await?;
    let table = CaseTable::parse_csv(&body)?;
    info!(
        "Fetched {} rows x {} dates for {}",
        table.rows.len(),
        table.dates.len(),
        category.label()
    );
    Ok(table)
}

/// Fetch and validate the full three-category snapshot.
pub async fn fetch_case_set(client: &Client) -> Result<CaseSet, FetchError> {
    let confirmed = fetch_table(client, Category::Confirmed).await?;
    let deaths = fetch_table(client, Category::Deaths).await?;
    let recovered = fetch_table(client, Category::Recovered).await?;
    CaseSet::from_tables(confirmed, deaths, recovered)
}

#[cfg(test)]
mod tests {
    use super::category_url;
    use crate::category::Category;

    #[test]
    fn test_category_urls() {
        assert!(category_url(Category::Confirmed).ends_with("confirmed_global.csv"));
        assert!(category_url(Category::Deaths).ends_with("deaths_global.csv"));
        assert!(category_url(Category::Recovered).ends_with("recovered_global.csv"));
    }
}
