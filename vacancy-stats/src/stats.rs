use std::collections::BTreeMap;

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Serialize;

use crate::salary::{estimate_rub_salary, RawSalary};
use crate::Result;

/// One job-listing site the aggregator can walk: a paginated vacancy feed
/// plus the site-specific reading of its salary fields.
pub trait JobSource {
    type Vacancy;

    /// Caption for this source's report table.
    fn title(&self) -> &'static str;

    /// Lazy page sequence for one language, each item one page of vacancy
    /// records. A failed request surfaces as the `Err` item and ends the
    /// sequence.
    fn fetch_pages<'a>(&'a self, language: &'a str) -> BoxStream<'a, Result<Vec<Self::Vacancy>>>;

    fn raw_salary(&self, vacancy: &Self::Vacancy) -> RawSalary;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    pub vacancies_found: u32,
    pub vacancies_processed: u32,
    pub average_salary: u32,
}

/// Walk every page of every language on one source and fold the vacancies
/// into per-language statistics. Languages are processed one after another,
/// one page in flight at a time; any request failure aborts the whole run.
pub async fn collect_language_stats<S>(
    source: &S,
    languages: &[&str],
) -> Result<BTreeMap<String, LanguageStats>>
where
    S: JobSource,
{
    let mut stats = BTreeMap::new();
    for language in languages {
        let mut vacancies_found = 0u32;
        let mut estimates = Vec::new();
        let mut pages = source.fetch_pages(language);
        while let Some(page) = pages.next().await {
            for vacancy in page? {
                vacancies_found += 1;
                if let Some(estimate) = estimate_rub_salary(&source.raw_salary(&vacancy)) {
                    estimates.push(estimate);
                }
            }
        }
        log::debug!(
            "{}: found {} vacancies for {}, {} with a usable salary",
            source.title(),
            vacancies_found,
            language,
            estimates.len()
        );
        // A language can come back with no computable salary at all; that is
        // a zero row, not an error.
        let average_salary = if estimates.is_empty() {
            0
        } else {
            (estimates.iter().map(|&e| e as u64).sum::<u64>() / estimates.len() as u64) as u32
        };
        stats.insert(
            language.to_string(),
            LanguageStats {
                vacancies_found,
                vacancies_processed: estimates.len() as u32,
                average_salary,
            },
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;
    use futures::stream;

    /// In-memory source yielding pre-baked pages of raw salaries.
    struct FakeSource {
        pages: Vec<Vec<RawSalary>>,
    }

    impl JobSource for FakeSource {
        type Vacancy = RawSalary;

        fn title(&self) -> &'static str {
            "Fake"
        }

        fn fetch_pages<'a>(&'a self, _language: &'a str) -> BoxStream<'a, Result<Vec<RawSalary>>> {
            stream::iter(self.pages.clone().into_iter().map(Ok)).boxed()
        }

        fn raw_salary(&self, vacancy: &RawSalary) -> RawSalary {
            *vacancy
        }
    }

    struct FailingSource;

    impl JobSource for FailingSource {
        type Vacancy = RawSalary;

        fn title(&self) -> &'static str {
            "Failing"
        }

        fn fetch_pages<'a>(&'a self, _language: &'a str) -> BoxStream<'a, Result<Vec<RawSalary>>> {
            stream::iter(vec![Err(Error::RequestNotOk(
                "https://api.example.com/vacancies".to_owned(),
            ))])
            .boxed()
        }

        fn raw_salary(&self, vacancy: &RawSalary) -> RawSalary {
            *vacancy
        }
    }

    fn rub(from: Option<u32>, to: Option<u32>) -> RawSalary {
        RawSalary {
            from,
            to,
            is_rub: true,
        }
    }

    #[tokio::test]
    async fn test_counts_vacancy_without_bounds_as_found_only() {
        let source = FakeSource {
            pages: vec![vec![rub(Some(100000), Some(200000)), rub(None, None)]],
        };
        let stats = collect_language_stats(&source, &["Python"]).await.unwrap();
        assert_eq!(
            stats["Python"],
            LanguageStats {
                vacancies_found: 2,
                vacancies_processed: 1,
                average_salary: 150000,
            }
        );
    }

    #[tokio::test]
    async fn test_foreign_currency_vacancy_is_not_processed() {
        let source = FakeSource {
            pages: vec![vec![
                rub(Some(100000), Some(200000)),
                RawSalary {
                    from: Some(3000),
                    to: Some(5000),
                    is_rub: false,
                },
            ]],
        };
        let stats = collect_language_stats(&source, &["Python"]).await.unwrap();
        assert_eq!(
            stats["Python"],
            LanguageStats {
                vacancies_found: 2,
                vacancies_processed: 1,
                average_salary: 150000,
            }
        );
    }

    #[tokio::test]
    async fn test_no_pages_leaves_zeroed_stats() {
        let source = FakeSource { pages: vec![] };
        let stats = collect_language_stats(&source, &["Ruby"]).await.unwrap();
        assert_eq!(stats["Ruby"], LanguageStats::default());
    }

    #[tokio::test]
    async fn test_accumulates_across_pages() {
        let _ = env_logger::try_init();
        let source = FakeSource {
            pages: vec![
                vec![rub(Some(60000), None), rub(None, None)],
                vec![rub(None, Some(100000)), rub(None, None)],
            ],
        };
        let stats = collect_language_stats(&source, &["Java", "C"]).await.unwrap();
        let expected = LanguageStats {
            vacancies_found: 4,
            vacancies_processed: 2,
            average_salary: 76000,
        };
        assert_eq!(stats["Java"], expected);
        assert_eq!(stats["C"], expected);
        for stats in stats.values() {
            assert!(stats.vacancies_processed <= stats.vacancies_found);
        }
    }

    #[tokio::test]
    async fn test_failed_page_aborts_the_run() {
        let result = collect_language_stats(&FailingSource, &["Python"]).await;
        assert!(result.is_err());
    }
}
