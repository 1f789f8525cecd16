//! CLI mode
//!
//! Runs one link command directly against the store and prints the result.

use anyhow::{Result, bail};

use crate::cli::Commands;
use crate::runtime::lifetime::StartupContext;
use crate::services::CreateLinkRequest;

/// Split `add` positionals into `(hash, url)`.
pub fn parse_add_args(args: &[String]) -> Result<(Option<String>, String)> {
    match args {
        [url] => Ok((None, url.clone())),
        [hash, url] => Ok((Some(hash.clone()), url.clone())),
        _ => bail!("add expects [HASH] <URL>"),
    }
}

/// Execute a non-server command, returning the line to print
pub async fn run_cli(command: Commands, startup: &StartupContext) -> Result<String> {
    let service = &startup.link_service;

    match command {
        Commands::Add { args } => {
            let (hash, url) = parse_add_args(&args)?;
            let created = service.create_link(CreateLinkRequest { hash, url }).await?;
            Ok(created.key)
        }
        Commands::Get { key } => Ok(service.resolve(&key).await?),
        Commands::Serve | Commands::GenerateConfig => {
            bail!("{:?} is not a link command", command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::StaticConfig;
    use crate::services::LinkService;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::utils::{ThreadRandom, is_alphabet_code};

    fn memory_startup() -> StartupContext {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        StartupContext {
            config: StaticConfig::default(),
            link_service: Arc::new(LinkService::new(store, Arc::new(ThreadRandom))),
        }
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let startup = memory_startup();

        let key = run_cli(
            Commands::Add {
                args: vec!["short".to_string(), "https://example.com".to_string()],
            },
            &startup,
        )
        .await
        .unwrap();
        assert_eq!(key, "short");

        let url = run_cli(
            Commands::Get {
                key: "short".to_string(),
            },
            &startup,
        )
        .await
        .unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_add_without_hash_generates_key() {
        let startup = memory_startup();

        let key = run_cli(
            Commands::Add {
                args: vec!["https://example.com/generated".to_string()],
            },
            &startup,
        )
        .await
        .unwrap();
        assert_eq!(key.len(), 4);
        assert!(is_alphabet_code(&key));
        assert_eq!(
            startup.link_service.resolve(&key).await.unwrap(),
            "https://example.com/generated"
        );
    }

    #[tokio::test]
    async fn test_get_missing_and_non_link_commands_fail() {
        let startup = memory_startup();

        let err = run_cli(
            Commands::Get {
                key: "missing".to_string(),
            },
            &startup,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::errors::FlatlinkerError>(),
            Some(crate::errors::FlatlinkerError::NotFound(_))
        ));

        assert!(run_cli(Commands::Serve, &startup).await.is_err());
    }

    #[test]
    fn test_parse_add_args() {
        let (hash, url) = parse_add_args(&["https://example.com".to_string()]).unwrap();
        assert_eq!(hash, None);
        assert_eq!(url, "https://example.com");

        let (hash, url) =
            parse_add_args(&["short".to_string(), "https://example.com".to_string()]).unwrap();
        assert_eq!(hash.as_deref(), Some("short"));
        assert_eq!(url, "https://example.com");

        assert!(parse_add_args(&[]).is_err());
    }
}
