use async_stream::stream;
use chrono::{Duration, Utc};
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;

use crate::salary::{positive_bound, RawSalary};
use crate::stats::JobSource;
use crate::{Error, Result};

const SJ_API_URL: &str = "https://api.superjob.ru/2.0/vacancies/";
/// SuperJob town code for Moscow.
const MOSCOW_TOWN: u32 = 4;
/// Trailing window for the publish-date filter; SuperJob wants an explicit
/// Unix timestamp cutoff rather than a relative period.
const SEARCH_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct SjVacancy {
    // SuperJob reports a missing bound as 0, not null.
    payment_from: i64,
    payment_to: i64,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    objects: Vec<SjVacancy>,
    more: bool,
}

pub struct SuperJob {
    client: Client,
    api_key: String,
}

impl SuperJob {
    /// SuperJob requires an application key on every request; it is handed
    /// in here and never read from ambient state.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    async fn fetch_page(&self, language: &str, published_from: i64, page: u32) -> Result<PageData> {
        let keyword = format!("Программист {}", language);
        log::debug!(
            "requesting vacancies from superjob, language: {}, page: {}",
            language,
            page
        );
        let resp = self
            .client
            .get(SJ_API_URL)
            .header("X-Api-App-Id", &self.api_key)
            .query(&[("keyword", keyword.as_str())])
            .query(&[("date_published_from", published_from)])
            .query(&[("town", MOSCOW_TOWN), ("no_agreement", 1), ("page", page)])
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let error_body = resp.text().await;
            log::error!(
                "failed to retrieve superjob vacancies, language: {}, page: {}, status: {}, error resp body: {:?}",
                language,
                page,
                status,
                error_body,
            );
            return Err(Error::RequestNotOk(SJ_API_URL.to_owned()));
        }
        let page_data = resp.json().await?;
        Ok(page_data)
    }
}

impl JobSource for SuperJob {
    type Vacancy = SjVacancy;

    fn title(&self) -> &'static str {
        "SuperJob Moscow"
    }

    fn fetch_pages<'a>(&'a self, language: &'a str) -> BoxStream<'a, Result<Vec<SjVacancy>>> {
        let pages = stream! {
            let search_from = Utc::now() - Duration::days(SEARCH_PERIOD_DAYS);
            let published_from = search_from.timestamp();
            let mut page = 0;
            loop {
                let page_data = match self.fetch_page(language, published_from, page).await {
                    Ok(page_data) => page_data,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                // The final page is yielded once, like every other page.
                let more = page_data.more;
                yield Ok(page_data.objects);
                if !more {
                    break;
                }
                page += 1;
            }
        };
        pages.boxed()
    }

    fn raw_salary(&self, vacancy: &SjVacancy) -> RawSalary {
        RawSalary {
            from: positive_bound(vacancy.payment_from),
            to: positive_bound(vacancy.payment_to),
            is_rub: vacancy.currency.as_deref() == Some("rub"),
        }
    }
}
