use async_stream::stream;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;

use crate::salary::{positive_bound, RawSalary};
use crate::stats::JobSource;
use crate::{Error, Result};

const HH_API_URL: &str = "https://api.hh.ru/vacancies";
/// HeadHunter area code for Moscow.
const MOSCOW_AREA: u32 = 1;
/// Trailing window for the publish-date filter, as the relative period the
/// API expects.
const SEARCH_PERIOD_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct HhSalary {
    from: Option<i64>,
    to: Option<i64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HhVacancy {
    salary: Option<HhSalary>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    items: Vec<HhVacancy>,
    page: u32,
    pages: u32,
}

impl PageData {
    /// True once this response is the last page worth requesting. Covers the
    /// regular 0-based final page, an empty result set (`pages == 0`) and
    /// responses reporting `page == pages`.
    fn is_last(&self) -> bool {
        self.page + 1 >= self.pages
    }
}

pub struct HeadHunter {
    client: Client,
}

impl HeadHunter {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_page(&self, language: &str, page: u32) -> Result<PageData> {
        let text = format!("Программист {}", language);
        log::debug!(
            "requesting vacancies from hh, language: {}, page: {}",
            language,
            page
        );
        let resp = self
            .client
            .get(HH_API_URL)
            .query(&[("text", text.as_str())])
            .query(&[
                ("area", MOSCOW_AREA),
                ("period", SEARCH_PERIOD_DAYS),
                ("page", page),
            ])
            .query(&[("only_with_salary", true)])
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let error_body = resp.text().await;
            log::error!(
                "failed to retrieve hh vacancies, language: {}, page: {}, status: {}, error resp body: {:?}",
                language,
                page,
                status,
                error_body,
            );
            return Err(Error::RequestNotOk(HH_API_URL.to_owned()));
        }
        let page_data = resp.json().await?;
        Ok(page_data)
    }
}

impl Default for HeadHunter {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSource for HeadHunter {
    type Vacancy = HhVacancy;

    fn title(&self) -> &'static str {
        "HeadHunter Moscow"
    }

    fn fetch_pages<'a>(&'a self, language: &'a str) -> BoxStream<'a, Result<Vec<HhVacancy>>> {
        let pages = stream! {
            let mut page = 0;
            loop {
                let page_data = match self.fetch_page(language, page).await {
                    Ok(page_data) => page_data,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                let done = page_data.is_last();
                yield Ok(page_data.items);
                if done {
                    break;
                }
                page += 1;
            }
        };
        pages.boxed()
    }

    fn raw_salary(&self, vacancy: &HhVacancy) -> RawSalary {
        match &vacancy.salary {
            Some(salary) => RawSalary {
                from: salary.from.and_then(positive_bound),
                to: salary.to.and_then(positive_bound),
                is_rub: salary.currency.as_deref() == Some("RUR"),
            },
            None => RawSalary {
                from: None,
                to: None,
                is_rub: false,
            },
        }
    }
}
