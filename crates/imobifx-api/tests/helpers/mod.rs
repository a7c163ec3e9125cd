//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in process: in-memory repositories, local image storage in a
//! temp dir and a canned address directory, so no database or network is needed.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use imobifx_api::setup::routes;
use imobifx_api::state::AppState;
use imobifx_core::models::Address;
use imobifx_core::{Config, RepositoryBackend};
use imobifx_db::MemoryRepository;
use imobifx_services::{AddressDirectory, AddressService, AdsService, DirectoryError, QuoteService};
use imobifx_storage::LocalImageStorage;
use tempfile::TempDir;

/// Image size limit used by the test app.
pub const MAX_IMAGE_BYTES: u64 = 1024;

/// CEP the fake directory knows.
pub const KNOWN_CEP: &str = "58000000";
/// CEP for which the fake directory behaves as if ViaCEP were down.
pub const OUTAGE_CEP: &str = "00000000";

/// Canned address directory: one known CEP, one outage, everything else unknown.
pub struct FakeDirectory;

#[async_trait]
impl AddressDirectory for FakeDirectory {
    async fn lookup(&self, cep_digits: &str) -> Result<Address, DirectoryError> {
        match cep_digits {
            KNOWN_CEP => Ok(Address {
                cep: "58000-000".to_string(),
                street: "Rua A".to_string(),
                neighborhood: "Centro".to_string(),
                city: "João Pessoa".to_string(),
                state: "PB".to_string(),
            }),
            OUTAGE_CEP => Err(DirectoryError::Unavailable("timeout".to_string())),
            _ => Err(DirectoryError::NotFound),
        }
    }
}

/// Test application: server plus the temp dir holding stored images.
pub struct TestApp {
    pub server: TestServer,
    pub images: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn images_dir(&self) -> &Path {
        self.images.path()
    }

    pub fn stored_images(&self) -> usize {
        std::fs::read_dir(self.images.path()).unwrap().count()
    }
}

pub async fn setup_test_app() -> TestApp {
    let images = TempDir::new().unwrap();
    let config = Config {
        repository_backend: RepositoryBackend::Memory,
        images_dir: images.path().to_path_buf(),
        max_image_bytes: MAX_IMAGE_BYTES,
        ..Config::default()
    };

    let repo = Arc::new(MemoryRepository::new());
    let storage = Arc::new(LocalImageStorage::new(images.path()).await.unwrap());

    let state = Arc::new(AppState {
        ads: AdsService::new(repo.clone(), repo.clone(), storage, config.max_image_bytes),
        quotes: QuoteService::new(repo),
        addresses: AddressService::new(Arc::new(FakeDirectory)),
    });

    let router = routes::setup_routes(&config, state).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp { server, images }
}
