// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds adapter instances from configuration.

use std::path::PathBuf;
use std::time::Duration;

use provisio_config::{PlatformConfig, ProvisioConfig};
use provisio_core::{PlatformAdapter, PlatformKind, ProvisionError};
use provisio_gitlab::GitlabAdapter;
use provisio_harbor::HarborAdapter;
use provisio_mattermost::MattermostAdapter;
use provisio_minio::MinioAdapter;
use tracing::debug;

/// Creates one adapter per configured platform.
///
/// REST adapters are built without network I/O. The MinIO adapter runs its
/// `mc` handshake here, so `build` is async.
#[derive(Debug, Clone)]
pub struct AdapterFactory {
    timeout: Duration,
    mc_path: PathBuf,
}

impl AdapterFactory {
    pub fn new(timeout: Duration, mc_path: impl Into<PathBuf>) -> Self {
        Self {
            timeout,
            mc_path: mc_path.into(),
        }
    }

    pub fn from_config(config: &ProvisioConfig) -> Self {
        Self::new(config.http.request_timeout(), &config.minio.mc_path)
    }

    pub async fn build(
        &self,
        platform: &PlatformConfig,
    ) -> Result<Box<dyn PlatformAdapter>, ProvisionError> {
        let credentials = platform.credentials();
        debug!(
            platform = %platform.id,
            kind = %platform.kind,
            auth = credentials.auth_mode().label(),
            "building adapter"
        );

        let adapter: Box<dyn PlatformAdapter> = match platform.kind {
            PlatformKind::Gitlab => Box::new(GitlabAdapter::new(
                &platform.id,
                &credentials,
                self.timeout,
            )?),
            PlatformKind::Mattermost => Box::new(MattermostAdapter::new(
                &platform.id,
                &credentials,
                self.timeout,
            )?),
            PlatformKind::Harbor => Box::new(HarborAdapter::new(
                &platform.id,
                &credentials,
                self.timeout,
            )?),
            PlatformKind::Minio => Box::new(
                MinioAdapter::connect_with_mc(
                    &platform.id,
                    &credentials,
                    self.mc_path.clone(),
                    self.timeout,
                )
                .await?,
            ),
        };
        Ok(adapter)
    }
}
