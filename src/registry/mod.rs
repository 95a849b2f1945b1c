//! Extension registry client
//!
//! The extension service behind a scope is stateful and not safe to keep
//! around across operations. [`ExtensionRegistryClient`] therefore opens a
//! fresh [`ExtensionService`] handle for every operation and closes it before
//! returning, whether the operation succeeded, failed, or unwound.

pub mod catalog;
pub mod local;

use std::path::PathBuf;

use crate::bundle::ExtensionDescriptor;
use crate::error::Result;
use crate::scope::SettingsScope;

pub use local::LocalExtensionService;

/// An extension already present in a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledExtension {
    pub identifier: String,
    pub name: String,
    pub version: String,
    pub install_path: PathBuf,
}

/// One open connection to the extension service of a scope
pub trait ExtensionService {
    fn is_installed(&mut self, extension: &ExtensionDescriptor) -> Result<bool>;

    /// Look up an installed extension; `None` is not an error
    fn get_installed(&mut self, identifier: &str) -> Result<Option<InstalledExtension>>;

    fn install(&mut self, extension: &ExtensionDescriptor, per_machine: bool) -> Result<()>;

    /// First uninstall phase: remove the extension
    fn uninstall(&mut self, extension: &InstalledExtension) -> Result<()>;

    /// Second uninstall phase: finalize the bookkeeping of a removal
    fn commit_external_uninstall(&mut self, extension: &InstalledExtension) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

/// Guard closing a service handle exactly once
struct ServiceHandle<'s> {
    service: Box<dyn ExtensionService + 's>,
    closed: bool,
}

impl<'s> ServiceHandle<'s> {
    fn open(scope: &'s dyn SettingsScope) -> Result<Self> {
        Ok(Self {
            service: scope.connect()?,
            closed: false,
        })
    }

    fn service(&mut self) -> &mut (dyn ExtensionService + 's) {
        self.service.as_mut()
    }

    fn close(mut self) -> Result<()> {
        self.closed = true;
        self.service.close()
    }
}

impl Drop for ServiceHandle<'_> {
    fn drop(&mut self) {
        if !self.closed {
            // Unwinding; the close error has nowhere to go
            let _ = self.service.close();
        }
    }
}

/// Per-operation access to the extension service of one scope
pub struct ExtensionRegistryClient<'s> {
    scope: &'s dyn SettingsScope,
}

impl<'s> ExtensionRegistryClient<'s> {
    pub fn new(scope: &'s dyn SettingsScope) -> Self {
        Self { scope }
    }

    /// Run one operation on a freshly opened handle, closing it afterwards.
    ///
    /// An operation error wins over a close error.
    fn with_service<T>(
        &self,
        action: impl FnOnce(&mut (dyn ExtensionService + 's)) -> Result<T>,
    ) -> Result<T> {
        let mut handle = ServiceHandle::open(self.scope)?;
        let outcome = action(handle.service());
        let closed = handle.close();

        let value = outcome?;
        closed?;
        Ok(value)
    }

    pub fn is_installed(&self, extension: &ExtensionDescriptor) -> Result<bool> {
        self.with_service(|service| service.is_installed(extension))
    }

    pub fn find_installed(&self, identifier: &str) -> Result<Option<InstalledExtension>> {
        self.with_service(|service| service.get_installed(identifier))
    }

    /// Remove an extension, then commit the removal on a second handle.
    ///
    /// The commit is not attempted when the removal fails.
    pub fn uninstall(&self, extension: &InstalledExtension) -> Result<()> {
        self.with_service(|service| service.uninstall(extension))?;
        self.with_service(|service| service.commit_external_uninstall(extension))
    }

    /// Install for the current user only
    pub fn install(&self, extension: &ExtensionDescriptor) -> Result<()> {
        self.with_service(|service| service.install(extension, false))
    }
}
