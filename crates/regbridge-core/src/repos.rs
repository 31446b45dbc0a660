//! Collecting the repositories owned by registered services.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    service::{flatten_services, ProductService},
    target::{PkgTarget, RepoInfo},
};

/// Repository metadata annotated with its source id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRepo {
    pub src_id: u32,
    #[serde(flatten)]
    pub info: RepoInfo,
}

pub struct RepositoryCollector<'a, T: PkgTarget> {
    target: &'a T,
}

impl<'a, T: PkgTarget> RepositoryCollector<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self { target }
    }

    /// The currently loaded repositories belonging to the services of
    /// `product_services`, in the target's enumeration order.
    ///
    /// Repositories marked for removal are skipped, as are repositories
    /// without a service or with a service outside the given set. Nothing
    /// is mutated.
    pub fn service_repos(&self, product_services: &[ProductService]) -> Vec<ServiceRepo> {
        let service_names: HashSet<&str> = flatten_services(product_services)
            .map(|service| service.name.as_str())
            .collect();

        debug!("registered services: {service_names:?}");

        let repos: Vec<ServiceRepo> = self
            .target
            .current_sources(false)
            .into_iter()
            .filter_map(|src_id| {
                self.target
                    .source_general_data(src_id)
                    .map(|info| ServiceRepo { src_id, info })
            })
            .filter(|repo| {
                repo.info
                    .service
                    .as_deref()
                    .is_some_and(|service| service_names.contains(service))
            })
            .collect();

        debug!(count = repos.len(), "service repositories: {repos:?}");

        repos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        service::Service,
        test_utils::{FakeRepo, FakeTarget},
    };
    use url::Url;

    fn product_services(names: &[&str]) -> Vec<ProductService> {
        vec![ProductService::new(
            names
                .iter()
                .map(|name| {
                    Service::new(
                        *name,
                        Url::parse(&format!("https://scc.example.com/{name}")).unwrap(),
                    )
                })
                .collect(),
        )]
    }

    #[test]
    fn test_service_repos_filters_by_service_name() {
        let target = FakeTarget {
            repos: vec![
                FakeRepo::new(0, "dvd", None),
                FakeRepo::new(1, "sles-updates-repo", Some("sles-updates")),
                FakeRepo::new(2, "third-party", Some("obs")),
                FakeRepo::new(3, "sles-pool-repo", Some("sles-pool")),
            ],
            ..FakeTarget::default()
        };

        let collector = RepositoryCollector::new(&target);
        let repos = collector.service_repos(&product_services(&["sles-updates", "sles-pool"]));

        let ids: Vec<u32> = repos.iter().map(|repo| repo.src_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(repos[0].info.alias, "sles-updates-repo");
    }

    #[test]
    fn test_service_repos_skips_removed_sources() {
        let target = FakeTarget {
            repos: vec![
                FakeRepo::new(0, "gone", Some("sles-updates")).removed(),
                FakeRepo::new(1, "kept", Some("sles-updates")),
            ],
            ..FakeTarget::default()
        };

        let collector = RepositoryCollector::new(&target);
        let repos = collector.service_repos(&product_services(&["sles-updates"]));

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].src_id, 1);
    }

    #[test]
    fn test_service_repos_preserves_enumeration_order() {
        let target = FakeTarget {
            repos: vec![
                FakeRepo::new(7, "b", Some("svc")),
                FakeRepo::new(2, "a", Some("svc")),
                FakeRepo::new(5, "c", Some("svc")),
            ],
            ..FakeTarget::default()
        };

        let collector = RepositoryCollector::new(&target);
        let repos = collector.service_repos(&product_services(&["svc"]));

        let ids: Vec<u32> = repos.iter().map(|repo| repo.src_id).collect();
        assert_eq!(ids, vec![7, 2, 5]);
    }

    #[test]
    fn test_service_repos_empty_without_matching_services() {
        let target = FakeTarget {
            repos: vec![FakeRepo::new(0, "dvd", None)],
            ..FakeTarget::default()
        };

        let collector = RepositoryCollector::new(&target);
        assert!(collector
            .service_repos(&product_services(&["sles-updates"]))
            .is_empty());
    }
}
