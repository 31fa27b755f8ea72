use crate::{config::Config, service::ServiceHandler};

use super::{ActiveBranches, BuildError, BuildMessage};

/// Gates and publishes build messages on the configured topic.
#[derive(Debug)]
pub struct BuildTrigger<'a> {
    topic: &'a str,
    active_branches: &'a ActiveBranches,
}

impl<'a> BuildTrigger<'a> {
    /// Fails when no topic is configured.
    pub fn from_config(config: &'a Config) -> Result<Self, BuildError> {
        match config.pubsub_topic() {
            Some(topic) => Ok(Self {
                topic,
                active_branches: config.active_branches(),
            }),
            None => {
                let err = BuildError::MissingTopic;
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    pub fn ensure_active(&self, branch: &str) -> Result<(), BuildError> {
        if self.active_branches.is_empty() {
            return Ok(());
        }

        tracing::info!(active_branches = %self.active_branches, "ACTIVE_BRANCHES list");
        if self.active_branches.allows(branch) {
            tracing::info!(
                "branch {} is present in {}",
                branch,
                self.active_branches
            );
            Ok(())
        } else {
            let err = BuildError::InactiveBranch {
                branch: branch.to_owned(),
                active_branches: self.active_branches.clone(),
            };
            tracing::error!("{}", err);
            Err(err)
        }
    }

    /// Publish `message` if its branch is active. Returns the bus message ID.
    #[tracing::instrument(skip(self, services))]
    pub async fn dispatch(
        &self,
        services: &ServiceHandler,
        message: &BuildMessage,
    ) -> Result<String, BuildError> {
        self.ensure_active(&message.branch)?;

        let payload = message
            .to_payload()
            .map_err(|e| BuildError::Serialization(e.to_string()))?;

        tracing::info!(
            message = "Triggering build",
            topic = self.topic,
            payload = %String::from_utf8_lossy(&payload)
        );

        match services.publisher().publish(self.topic, payload).await {
            Ok(message_id) => {
                tracing::info!(message_id = %message_id, "Topic published successfully");
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not publish build message");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use crate::{
        build::{BuildError, BuildMessage, RepositoryPath},
        config::Config,
        pubsub::{fake::FakePublisher, PubSubError},
        service::ServiceHandler,
    };

    use super::BuildTrigger;

    fn create_test_config() -> Config {
        let mut config = Config::empty();
        config.set_pubsub_topic("builds");
        config
    }

    fn create_test_services() -> ServiceHandler {
        ServiceHandler::new(Arc::new(FakePublisher::new()))
    }

    fn create_test_message(branch: &str) -> BuildMessage {
        BuildMessage::new("svc", "org/svc", branch, Some("abcdef1234567"))
    }

    #[test]
    fn test_missing_topic() {
        let config = Config::empty();
        assert_matches!(
            BuildTrigger::from_config(&config),
            Err(BuildError::MissingTopic)
        );
    }

    #[tokio::test]
    async fn test_dispatch_publishes_once() {
        let config = create_test_config();
        let services = create_test_services();
        let trigger = BuildTrigger::from_config(&config).unwrap();

        let message_id = trigger
            .dispatch(&services, &create_test_message("refs/heads/main"))
            .await
            .unwrap();
        assert_eq!(message_id, "1");

        let fake = FakePublisher::extract(&services);
        assert_eq!(fake.publish.num_calls(), 1);
        assert_eq!(fake.publish.calls()[0].0, "builds");
    }

    #[tokio::test]
    async fn test_dispatch_active_branch() {
        let mut config = create_test_config();
        config.set_active_branches("refs/heads/main___refs/heads/dev");
        let services = create_test_services();
        let trigger = BuildTrigger::from_config(&config).unwrap();

        trigger
            .dispatch(&services, &create_test_message("refs/heads/dev"))
            .await
            .unwrap();

        assert_eq!(FakePublisher::extract(&services).publish.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_inactive_branch() {
        let mut config = create_test_config();
        config.set_active_branches("refs/heads/main___refs/heads/dev");
        let services = create_test_services();
        let trigger = BuildTrigger::from_config(&config).unwrap();

        let err = trigger
            .dispatch(&services, &create_test_message("refs/heads/feature/x"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "refs/heads/feature/x is not present in the ACTIVE_BRANCHES env var (refs/heads/main,refs/heads/dev), skip"
        );

        assert!(!FakePublisher::extract(&services).publish.called());
    }

    #[tokio::test]
    async fn test_dispatch_from_repository() {
        let mut config = create_test_config();
        config.set_active_branches("refs/heads/main");
        let services = create_test_services();
        let trigger = BuildTrigger::from_config(&config).unwrap();

        let repo: RepositoryPath = "org/svc".parse().unwrap();
        let message = BuildMessage::from_repository(&repo, "refs/heads/main", None);
        trigger.dispatch(&services, &message).await.unwrap();

        let published = FakePublisher::extract(&services).published_json();
        assert_eq!(
            published,
            vec![serde_json::json!({
                "repo": "svc",
                "branch": "refs/heads/main",
                "branch_short": "main",
                "ssh_clone_url": "git@github.com:org/svc",
                "tag1": "svc",
                "tag2": "refs-heads-main"
            })]
        );
    }

    #[tokio::test]
    async fn test_dispatch_publish_error() {
        let config = create_test_config();
        let fake = FakePublisher::new();
        fake.publish
            .return_value(Err(PubSubError::CouldNotPublish("unreachable".into())));
        let services = ServiceHandler::new(Arc::new(fake));
        let trigger = BuildTrigger::from_config(&config).unwrap();

        let err = trigger
            .dispatch(&services, &create_test_message("refs/heads/main"))
            .await
            .unwrap_err();
        assert_matches!(err, BuildError::Publish(PubSubError::CouldNotPublish(_)));
    }
}
