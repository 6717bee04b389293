//! Concurrent multi-region listing with per-region failure isolation

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tracing::warn;

use crate::domain::DomainError;

/// Issues `per_region` once per region, all concurrently, and concatenates
/// the results.
///
/// Each call is independently bounded by `timeout` and failure-guarded: an
/// error or timeout in one region is logged and contributes an empty list
/// without cancelling the in-flight siblings, so one unreachable region
/// never empties the whole inventory. Result order carries no guarantee
/// beyond "union of the successful regions".
pub async fn list_across_regions<T, F, Fut>(
    regions: &[String],
    timeout: Duration,
    per_region: F,
) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>, DomainError>>,
{
    let calls = regions.iter().map(|region| {
        let region = region.clone();
        let call = per_region(region.clone());

        async move {
            match tokio::time::timeout(timeout, call).await {
                Ok(Ok(items)) => items,
                Ok(Err(err)) => {
                    warn!(region = %region, error = %err, "Regional listing failed, skipping region");
                    Vec::new()
                }
                Err(_) => {
                    warn!(region = %region, timeout_secs = timeout.as_secs(), "Regional listing timed out, skipping region");
                    Vec::new()
                }
            }
        }
    });

    join_all(calls).await.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(names: &[&str]) -> Vec<String> {
        names.iter().map(|r| r.to_string()).collect()
    }

    #[tokio::test]
    async fn test_concatenates_all_regions() {
        let result = list_across_regions(
            &regions(&["us-east-1", "eu-west-1"]),
            Duration::from_secs(5),
            |region| async move { Ok(vec![format!("{}-item", region)]) },
        )
        .await;

        assert_eq!(result.len(), 2);
        assert!(result.contains(&"us-east-1-item".to_string()));
        assert!(result.contains(&"eu-west-1-item".to_string()));
    }

    #[tokio::test]
    async fn test_failed_region_contributes_empty_result() {
        let result = list_across_regions(
            &regions(&["us-east-1", "ap-east-1", "eu-west-1"]),
            Duration::from_secs(5),
            |region| async move {
                if region == "ap-east-1" {
                    Err(DomainError::inventory("ec2", "not authorized"))
                } else {
                    Ok(vec![region])
                }
            },
        )
        .await;

        assert_eq!(result.len(), 2);
        assert!(!result.contains(&"ap-east-1".to_string()));
    }

    #[tokio::test]
    async fn test_hung_region_is_bounded_by_timeout() {
        let result = list_across_regions(
            &regions(&["us-east-1", "me-south-1"]),
            Duration::from_millis(50),
            |region| async move {
                if region == "me-south-1" {
                    // Never resolves within the timeout
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
                Ok(vec![region])
            },
        )
        .await;

        assert_eq!(result, vec!["us-east-1".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_region_set_lists_nothing() {
        let result: Vec<String> =
            list_across_regions(&[], Duration::from_secs(5), |region| async move {
                Ok(vec![region])
            })
            .await;

        assert!(result.is_empty());
    }
}
