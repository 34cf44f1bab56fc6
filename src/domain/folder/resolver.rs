//! Folder-to-team resolution
//!
//! Picks a strategy from the folder's declared type, runs the matching
//! collaborators and checks what comes back against what the caller asked
//! for. A folder must never be handed a team of the wrong visibility or the
//! wrong kind.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::collaborators::{DisplayNameFormatter, ImplicitTeamResolver, NameParser, TeamLoader};
use super::entity::{Folder, FolderRecord, FolderTeam, FolderType, Visibility};
use super::error::ResolveError;
use crate::domain::context::RequestContext;

/// Resolves folder descriptors to team identities. Stateless; safe to share
/// across concurrent resolutions.
#[derive(Clone)]
pub struct FolderTeamResolver {
    parser: Arc<dyn NameParser>,
    formatter: Arc<dyn DisplayNameFormatter>,
    team_loader: Arc<dyn TeamLoader>,
    implicit_teams: Arc<dyn ImplicitTeamResolver>,
}

impl fmt::Debug for FolderTeamResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderTeamResolver").finish_non_exhaustive()
    }
}

impl FolderTeamResolver {
    pub fn new(
        parser: Arc<dyn NameParser>,
        formatter: Arc<dyn DisplayNameFormatter>,
        team_loader: Arc<dyn TeamLoader>,
        implicit_teams: Arc<dyn ImplicitTeamResolver>,
    ) -> Self {
        Self {
            parser,
            formatter,
            team_loader,
            implicit_teams,
        }
    }

    /// Resolve a folder to the team backing it
    #[instrument(
        skip(self, ctx, folder),
        fields(folder = %folder.name, folder_type = %folder.folder_type, private = folder.private)
    )]
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
    ) -> Result<FolderTeam, ResolveError> {
        let result = match folder.folder_type {
            FolderType::Private if !folder.private => Err(ResolveError::Consistency {
                folder_type: FolderType::Private,
                private: false,
            }),
            FolderType::Public if folder.private => Err(ResolveError::Consistency {
                folder_type: FolderType::Public,
                private: true,
            }),
            FolderType::Private | FolderType::Public => {
                self.resolve_implicit_team(ctx, folder).await
            }
            FolderType::Team => self.resolve_team(ctx, folder).await,
        };

        match &result {
            Ok(team) => debug!(
                team_id = %team.team_id,
                visibility = %team.visibility,
                "Resolved folder team"
            ),
            Err(e) => debug!(error = %e, kind = ?e.kind(), "Folder resolution failed"),
        }

        result
    }

    /// Resolve a folder that arrived in wire form. Unknown folder type codes
    /// are rejected before any collaborator runs.
    pub async fn resolve_record(
        &self,
        ctx: &RequestContext,
        record: FolderRecord,
    ) -> Result<FolderTeam, ResolveError> {
        let folder = Folder::try_from(record).inspect_err(|e| {
            debug!(error = %e, "Rejected folder record");
        })?;

        self.resolve(ctx, &folder).await
    }

    async fn resolve_team(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
    ) -> Result<FolderTeam, ResolveError> {
        if !folder.private {
            return Err(ResolveError::Unsupported);
        }

        let team_name = self
            .parser
            .parse_private_team_path(&folder.name)
            .map_err(|source| ResolveError::NameParse {
                name: folder.name.clone(),
                source,
            })?;

        debug!(team = %team_name, "Loading explicit team");

        // Not forced: a subteam renamed concurrently may still load under
        // its old name, or fail to load.
        let team = ctx
            .run(self.team_loader.load(ctx, &team_name, false))
            .await
            .map_err(ResolveError::TeamLoad)?;

        let folder_public = !folder.private;

        if team.is_public() != folder_public {
            warn!(
                team = %team_name,
                folder_public,
                team_public = team.is_public(),
                "Team publicity does not match folder"
            );
            return Err(ResolveError::VisibilityMismatch {
                folder_public,
                team_public: team.is_public(),
            });
        }

        Ok(FolderTeam {
            team_id: team.id().clone(),
            visibility: Visibility::from_private_bit(folder.private),
        })
    }

    async fn resolve_implicit_team(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
    ) -> Result<FolderTeam, ResolveError> {
        let visibility = Visibility::from_private_bit(folder.private);
        let is_public = visibility.is_public();

        let name = self
            .parser
            .parse_implicit_team_name(&folder.name, is_public)
            .map_err(|source| ResolveError::NameParse {
                name: folder.name.clone(),
                source,
            })?;

        let display_name = ctx
            .run(self.formatter.format(ctx, &name))
            .await
            .map_err(ResolveError::Format)?;

        debug!(display_name = %display_name, is_public, "Looking up implicit team");

        let team_id = ctx
            .run(self.implicit_teams.lookup_or_create(ctx, &display_name, is_public))
            .await
            .map_err(ResolveError::LookupCreate)?;

        Ok(FolderTeam {
            team_id,
            visibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    use crate::domain::folder::collaborators::{
        MockDisplayNameFormatter, MockImplicitTeamResolver, MockNameParser, MockTeamLoader,
    };
    use crate::domain::folder::error::{NameParseError, ResolveErrorKind};
    use crate::domain::implicit_team::{CanonicalName, ImplicitTeamName, ImplicitTeamNameError};
    use crate::domain::team::{Team, TeamId, TeamName, TeamValidationError};
    use crate::domain::DomainError;
    use crate::infrastructure::naming::DefaultNameParser;

    struct Mocks {
        parser: MockNameParser,
        formatter: MockDisplayNameFormatter,
        loader: MockTeamLoader,
        implicit: MockImplicitTeamResolver,
    }

    impl Mocks {
        /// Mocks with no expectations; any collaborator call panics
        fn new() -> Self {
            Self {
                parser: MockNameParser::new(),
                formatter: MockDisplayNameFormatter::new(),
                loader: MockTeamLoader::new(),
                implicit: MockImplicitTeamResolver::new(),
            }
        }

        fn build(self) -> FolderTeamResolver {
            FolderTeamResolver::new(
                Arc::new(self.parser),
                Arc::new(self.formatter),
                Arc::new(self.loader),
                Arc::new(self.implicit),
            )
        }
    }

    fn team(name: &str, is_public: bool) -> Team {
        Team::new(TeamName::parse(name).unwrap(), is_public)
    }

    fn expect_team_parse(mocks: &mut Mocks, name: &'static str) {
        mocks
            .parser
            .expect_parse_private_team_path()
            .withf(move |n| n == name)
            .times(1)
            .returning(|n| TeamName::parse(n).map_err(NameParseError::from));
    }

    fn expect_implicit_parse(mocks: &mut Mocks, times: usize) {
        mocks
            .parser
            .expect_parse_implicit_team_name()
            .times(times)
            .returning(|n, _| ImplicitTeamName::parse(n).map_err(NameParseError::from));
    }

    fn expect_format(mocks: &mut Mocks, canonical: &'static str, times: usize) {
        mocks
            .formatter
            .expect_format()
            .times(times)
            .returning(move |_, _| Ok(CanonicalName::new(canonical)));
    }

    #[tokio::test]
    async fn test_private_folder_with_public_bit_is_inconsistent() {
        let resolver = Mocks::new().build();
        let folder = Folder::new("alice,bob", FolderType::Private, false);

        let err = resolver
            .resolve(&RequestContext::background(), &folder)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::Consistency);
        assert_eq!(err.to_string(), "folder type PRIVATE but private bit is false");
    }

    #[tokio::test]
    async fn test_public_folder_with_private_bit_is_inconsistent() {
        let resolver = Mocks::new().build();
        let folder = Folder::new("alice,bob", FolderType::Public, true);

        let err = resolver
            .resolve(&RequestContext::background(), &folder)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::Consistency);
        assert_eq!(err.to_string(), "folder type PUBLIC but private bit is true");
    }

    #[tokio::test]
    async fn test_unrecognized_folder_types() {
        let resolver = Mocks::new().build();

        for code in [0, 4, -1, 99] {
            for private in [true, false] {
                let record = FolderRecord {
                    name: "alice".to_string(),
                    folder_type: code,
                    private,
                };

                let err = resolver
                    .resolve_record(&RequestContext::background(), record)
                    .await
                    .unwrap_err();

                assert!(matches!(err, ResolveError::UnrecognizedKind(c) if c == code));
            }
        }
    }

    #[tokio::test]
    async fn test_public_team_folder_is_unsupported() {
        let mut mocks = Mocks::new();
        mocks.loader.expect_load().never();
        let resolver = mocks.build();

        let folder = Folder::new("team1", FolderType::Team, false);
        let err = resolver
            .resolve(&RequestContext::background(), &folder)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn test_private_team_folder_resolves() {
        let loaded = team("team1", false);
        let expected_id = loaded.id().clone();

        let mut mocks = Mocks::new();
        expect_team_parse(&mut mocks, "team1");
        mocks
            .loader
            .expect_load()
            .withf(|_, name, force_refresh| name.as_str() == "team1" && !*force_refresh)
            .times(1)
            .returning(move |_, _, _| Ok(loaded.clone()));
        let resolver = mocks.build();

        let result = resolver
            .resolve(&RequestContext::background(), &Folder::team("team1"))
            .await
            .unwrap();

        assert_eq!(result.team_id, expected_id);
        assert_eq!(result.visibility, Visibility::Private);
    }

    #[tokio::test]
    async fn test_public_team_for_private_folder_is_mismatch() {
        let mut mocks = Mocks::new();
        expect_team_parse(&mut mocks, "team1");
        mocks
            .loader
            .expect_load()
            .times(1)
            .returning(|_, _, _| Ok(team("team1", true)));
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::team("team1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::VisibilityMismatch {
                folder_public: false,
                team_public: true
            }
        ));
    }

    #[tokio::test]
    async fn test_team_load_failure_is_wrapped() {
        let mut mocks = Mocks::new();
        expect_team_parse(&mut mocks, "team1");
        mocks
            .loader
            .expect_load()
            .times(1)
            .returning(|_, name, _| Err(DomainError::not_found(format!("Team '{}' not found", name))));
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::team("team1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::TeamLoad);
        assert!(matches!(err, ResolveError::TeamLoad(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_bad_team_name_skips_loader() {
        let mut mocks = Mocks::new();
        mocks
            .parser
            .expect_parse_private_team_path()
            .times(1)
            .returning(|n| TeamName::parse(n).map_err(NameParseError::from));
        mocks.loader.expect_load().never();
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::team("bad-name"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::NameParse {
                ref name,
                source: NameParseError::TeamName(TeamValidationError::InvalidPartCharacters(_)),
            } if name == "bad-name"
        ));
    }

    #[tokio::test]
    async fn test_private_implicit_folder_resolves() {
        let expected_id = TeamId::derive("private/alice,bob", false, false);
        let returned_id = expected_id.clone();

        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        expect_format(&mut mocks, "alice,bob", 1);
        mocks
            .implicit
            .expect_lookup_or_create()
            .withf(|_, name, is_public| name.as_str() == "alice,bob" && !*is_public)
            .times(1)
            .returning(move |_, _, _| Ok(returned_id.clone()));
        let resolver = mocks.build();

        let result = resolver
            .resolve(&RequestContext::background(), &Folder::private("bob,alice"))
            .await
            .unwrap();

        assert_eq!(result.team_id, expected_id);
        assert_eq!(result.visibility, Visibility::Private);
    }

    #[tokio::test]
    async fn test_public_visibility_ignores_collaborator_id() {
        // The collaborator hands back a private-tagged ID; visibility still
        // follows the folder's private bit.
        let returned_id = TeamId::derive("anything", false, false);

        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        expect_format(&mut mocks, "alice", 1);
        mocks
            .implicit
            .expect_lookup_or_create()
            .withf(|_, _, is_public| *is_public)
            .times(1)
            .returning(move |_, _, _| Ok(returned_id.clone()));
        let resolver = mocks.build();

        let result = resolver
            .resolve(&RequestContext::background(), &Folder::public("alice"))
            .await
            .unwrap();

        assert_eq!(result.visibility, Visibility::Public);
    }

    #[tokio::test]
    async fn test_bad_implicit_name_skips_formatter() {
        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        mocks.formatter.expect_format().never();
        mocks.implicit.expect_lookup_or_create().never();
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::private("#bob"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::NameParse);
    }

    #[tokio::test]
    async fn test_parser_receives_folder_publicness() {
        let mut mocks = Mocks::new();
        mocks
            .parser
            .expect_parse_implicit_team_name()
            .withf(|name, is_public| name == "alice" && *is_public)
            .times(1)
            .returning(|n, _| ImplicitTeamName::parse(n).map_err(NameParseError::from));
        expect_format(&mut mocks, "alice", 1);
        mocks
            .implicit
            .expect_lookup_or_create()
            .times(1)
            .returning(|_, name, is_public| Ok(TeamId::derive(name.as_str(), is_public, false)));
        let resolver = mocks.build();

        let result = resolver
            .resolve(&RequestContext::background(), &Folder::public("alice"))
            .await
            .unwrap();

        assert_eq!(result.visibility, Visibility::Public);
    }

    #[tokio::test]
    async fn test_implicit_name_must_match_folder_publicness() {
        let cases = [
            (
                Folder::public("alice#bob"),
                NameParseError::ImplicitTeamName(ImplicitTeamNameError::ReadersOnPublic),
            ),
            (
                Folder::private("/keybase/public/alice"),
                NameParseError::PathVisibility {
                    name: "/keybase/public/alice".to_string(),
                    path_public: true,
                },
            ),
            (
                Folder::public("/keybase/private/alice#bob"),
                NameParseError::PathVisibility {
                    name: "/keybase/private/alice#bob".to_string(),
                    path_public: false,
                },
            ),
        ];

        for (folder, expected) in cases {
            let mut mocks = Mocks::new();
            mocks.formatter.expect_format().never();
            mocks.implicit.expect_lookup_or_create().never();
            let resolver = FolderTeamResolver::new(
                Arc::new(DefaultNameParser::new()),
                Arc::new(mocks.formatter),
                Arc::new(mocks.loader),
                Arc::new(mocks.implicit),
            );

            let err = resolver
                .resolve(&RequestContext::background(), &folder)
                .await
                .unwrap_err();

            match err {
                ResolveError::NameParse { name, source } => {
                    assert_eq!(name, folder.name);
                    assert_eq!(source, expected);
                }
                other => panic!("expected NameParse for '{}', got {:?}", folder.name, other),
            }
        }
    }

    #[tokio::test]
    async fn test_format_failure_skips_lookup() {
        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        mocks
            .formatter
            .expect_format()
            .times(1)
            .returning(|_, _| Err(DomainError::validation("cannot resolve assertion")));
        mocks.implicit.expect_lookup_or_create().never();
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::private("alice"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::Format);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_wrapped() {
        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        expect_format(&mut mocks, "alice", 1);
        mocks
            .implicit
            .expect_lookup_or_create()
            .times(1)
            .returning(|_, _, _| Err(DomainError::storage("backend unavailable")));
        let resolver = mocks.build();

        let err = resolver
            .resolve(&RequestContext::background(), &Folder::private("alice"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResolveErrorKind::LookupCreate);
        assert!(!err.is_interrupted());
    }

    #[tokio::test]
    async fn test_visibility_always_follows_private_bit() {
        for (folder, expected) in [
            (Folder::private("alice"), Visibility::Private),
            (Folder::public("alice"), Visibility::Public),
            (Folder::team("team1"), Visibility::Private),
        ] {
            let mut mocks = Mocks::new();
            mocks
                .parser
                .expect_parse_private_team_path()
                .returning(|n| TeamName::parse(n).map_err(NameParseError::from));
            expect_implicit_parse(&mut mocks, folder_is_implicit(&folder));
            expect_format(&mut mocks, "alice", folder_is_implicit(&folder));
            mocks
                .loader
                .expect_load()
                .returning(|_, _, _| Ok(team("team1", false)));
            mocks
                .implicit
                .expect_lookup_or_create()
                // Deliberately the opposite tag of what was requested
                .returning(|_, name, is_public| Ok(TeamId::derive(name.as_str(), !is_public, false)));
            let resolver = mocks.build();

            let result = resolver
                .resolve(&RequestContext::background(), &folder)
                .await
                .unwrap();

            assert_eq!(result.visibility, expected);
            assert_eq!(result.visibility, Visibility::from_private_bit(folder.private));
        }
    }

    fn folder_is_implicit(folder: &Folder) -> usize {
        usize::from(folder.folder_type != FolderType::Team)
    }

    /// Lookup-or-create fake that counts creations and can be slowed down
    #[derive(Default)]
    struct CountingImplicitTeams {
        teams: Mutex<HashMap<(String, bool), TeamId>>,
        creations: AtomicUsize,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl ImplicitTeamResolver for CountingImplicitTeams {
        async fn lookup_or_create(
            &self,
            _ctx: &RequestContext,
            name: &CanonicalName,
            is_public: bool,
        ) -> Result<TeamId, DomainError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let mut teams = self.teams.lock().await;
            let id = teams
                .entry((name.as_str().to_string(), is_public))
                .or_insert_with(|| {
                    self.creations.fetch_add(1, Ordering::SeqCst);
                    TeamId::derive(name.as_str(), is_public, false)
                })
                .clone();

            Ok(id)
        }
    }

    #[tokio::test]
    async fn test_concurrent_resolves_create_once() {
        let implicit = Arc::new(CountingImplicitTeams::default());

        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 2);
        expect_format(&mut mocks, "alice,bob", 2);
        let resolver = FolderTeamResolver::new(
            Arc::new(mocks.parser),
            Arc::new(mocks.formatter),
            Arc::new(mocks.loader),
            implicit.clone(),
        );

        let ctx = RequestContext::background();
        let folder = Folder::private("alice,bob");
        let (first, second) = tokio::join!(
            resolver.resolve(&ctx, &folder),
            resolver.resolve(&ctx, &folder)
        );

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(implicit.creations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancellation_surfaces_as_lookup_error() {
        let implicit = Arc::new(CountingImplicitTeams {
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        });

        let mut mocks = Mocks::new();
        expect_implicit_parse(&mut mocks, 1);
        expect_format(&mut mocks, "alice", 1);
        let resolver = FolderTeamResolver::new(
            Arc::new(mocks.parser),
            Arc::new(mocks.formatter),
            Arc::new(mocks.loader),
            implicit.clone(),
        );

        let token = CancellationToken::new();
        let ctx = RequestContext::background().with_cancellation(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = resolver
            .resolve(&ctx, &Folder::private("alice"))
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(err, ResolveError::LookupCreate(DomainError::Cancelled)));
        assert!(err.is_interrupted());
        assert_eq!(implicit.creations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_deadline_surfaces_as_team_load_error() {
        let mut mocks = Mocks::new();
        expect_team_parse(&mut mocks, "team1");
        mocks
            .loader
            .expect_load()
            .times(0..=1)
            .returning(|_, _, _| Ok(team("team1", false)));
        let resolver = mocks.build();

        let ctx = RequestContext::background().with_timeout(Duration::ZERO);
        let err = resolver
            .resolve(&ctx, &Folder::team("team1"))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::TeamLoad(DomainError::DeadlineExceeded)));
    }
}
