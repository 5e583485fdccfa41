//! Handle reconciliation - business logic orchestration
//!
//! This module contains the three-state reconciliation policy over the
//! handle/DC pair: create a missing handle and attach it to the configured
//! datastream, reflect the canonical handle URL into the object's Dublin
//! Core stream, and retract both when no qualifying datastream remains.

use hdlmint_dc::{DcError, DublinCore};

use super::{
    entity::DerivativeHook,
    error::ReconcileError,
    ids::{Dsid, Pid},
    report::{Message, Outcome},
};
use crate::ports::{AssociationStore, HandleAttacher, HandleRegistry, RepositoryObject};

/// Registry response code signalling the handle was created.
const HANDLE_CREATED: u16 = 201;
/// Registry response code signalling the handle was deleted.
const HANDLE_DELETED: u16 = 204;
/// Registry response code the delete path tolerates: the server reports a
/// conflict when the handle is already gone on its side.
const HANDLE_DELETE_CONFLICT: u16 = 500;

/// Service reconciling handles and Dublin Core entries for repository objects
///
/// The reconciler coordinates four collaborators injected at construction:
/// the handle registry, the association configuration, the attachment step,
/// and (per call) the repository object. It owns no state of its own; the
/// check-before-write pattern in each operation makes repeated invocations
/// for the same object converge.
///
/// Every operation returns an [`Outcome`] and never an error value: port
/// failures are folded into operational-log messages so a failure on one
/// object cannot interrupt processing of the next.
///
/// ## Static Dispatch
///
/// The service is generic over its port implementations. The compiler
/// generates specialized versions for each concrete combination, so the
/// abstraction costs nothing at runtime.
pub struct HandleReconciler<R, A, B> {
    registry: R,
    associations: A,
    attacher: B,
}

impl<R, A, B> HandleReconciler<R, A, B>
where
    R: HandleRegistry,
    A: AssociationStore,
    B: HandleAttacher,
{
    /// Create a reconciler over the given collaborators
    pub fn new(registry: R, associations: A, attacher: B) -> Self {
        Self {
            registry,
            associations,
            attacher,
        }
    }

    /// Ensure a handle exists for the object, then attach it to the
    /// datastream the hook targets.
    ///
    /// A missing handle is created first; any registry response other than
    /// the created code is a hard failure carrying the registry's reported
    /// error, and attachment is not attempted. Otherwise the first
    /// association matching the hook's destination datastream (and actually
    /// present on the object) receives the attachment; associations for the
    /// object's other content models are ignored after that first match. No
    /// matching association at all is a vacuous success.
    pub async fn ensure_and_attach<O>(&self, object: &O, hook: &DerivativeHook) -> Outcome
    where
        O: RepositoryObject,
    {
        let pid = object.pid();

        let handle_exists = match self.registry.exists(pid).await {
            Ok(exists) => exists,
            Err(err) => return Outcome::failure(registry_unreachable(pid, &err)),
        };

        let mut outcome = Outcome::ok();

        if !handle_exists {
            match self.registry.create(pid).await {
                Ok(response) if response.code == HANDLE_CREATED => {}
                Ok(response) => {
                    outcome.fail_with(
                        Message::operational_error("Error constructing handle for @pid: @error.")
                            .with_substitution("@pid", pid)
                            .with_substitution("@error", response.error_detail()),
                    );
                    return outcome;
                }
                Err(err) => {
                    outcome.fail_with(registry_unreachable(pid, &err));
                    return outcome;
                }
            }
        }

        for association in self.associations.associations_for(&object.models()) {
            if association.dsid() != hook.destination_dsid()
                || !object.has_datastream(association.dsid())
            {
                continue;
            }

            match self
                .attacher
                .attach(object, association.dsid(), association.transform())
                .await
            {
                Ok(report) => {
                    if !report.success {
                        outcome.mark_failed();
                    }
                    outcome.push(report.message);
                }
                Err(err) => {
                    outcome.fail_with(
                        Message::operational_error(
                            "Failed to apply handle to @dsid on @pid: @error.",
                        )
                        .with_substitution("@dsid", association.dsid())
                        .with_substitution("@pid", pid)
                        .with_substitution("@error", err),
                    );
                }
            }

            // First matching association wins; one attachment per invocation.
            break;
        }

        outcome
    }

    /// Reflect the canonical handle URL into the object's DC stream.
    ///
    /// Preconditions are evaluated and reported independently: the handle
    /// must already exist and the object must carry a DC datastream; both
    /// failures can appear in one outcome. When the preconditions hold, the
    /// DC document is edited through [`DublinCore::ensure_identifier`] and
    /// written back only if an edit actually happened; an already-current
    /// identifier yields success with no messages and no write.
    pub async fn sync_dublin_core<O>(&self, object: &O) -> Outcome
    where
        O: RepositoryObject,
    {
        let pid = object.pid();
        let dc = Dsid::dc();
        let mut outcome = Outcome::ok();

        match self.registry.exists(pid).await {
            Ok(true) => {}
            Ok(false) => outcome.fail_with(
                Message::operational_error("@pid does not have a handle to record in DC.")
                    .with_substitution("@pid", pid),
            ),
            Err(err) => outcome.fail_with(registry_unreachable(pid, &err)),
        }
        if !object.has_datastream(&dc) {
            outcome.fail_with(
                Message::operational_error("@pid does not have a DC datastream to update.")
                    .with_substitution("@pid", pid),
            );
        }
        if !outcome.success() {
            return outcome;
        }

        let content = match object.read_datastream(&dc).await {
            Ok(content) => content,
            Err(err) => return Outcome::failure(dc_update_failed(pid, &err)),
        };
        let mut document = match DublinCore::parse(&content) {
            Ok(document) => document,
            Err(err) => return Outcome::failure(dc_unparsable(pid, &err)),
        };

        let handle_url = self.registry.canonical_url(pid);
        if document.ensure_identifier(&handle_url) {
            let serialized = match document.to_bytes() {
                Ok(bytes) => bytes,
                Err(err) => return Outcome::failure(dc_update_failed(pid, &err)),
            };
            if let Err(err) = object.write_datastream(&dc, serialized).await {
                return Outcome::failure(dc_update_failed(pid, &err));
            }
        }

        outcome
    }

    /// Retract the handle and its DC entry once no qualifying datastream
    /// remains on the object.
    ///
    /// A missing handle, or any associated datastream still present, makes
    /// this a no-op success. Otherwise the DC identifier equal to the
    /// canonical URL is removed (when a DC stream exists, persisting only if
    /// something was removed) and the registry deletion is requested; the
    /// deleted code and the server-side conflict code both count as success.
    pub async fn retract_if_orphaned<O>(&self, object: &O) -> Outcome
    where
        O: RepositoryObject,
    {
        let pid = object.pid();

        match self.registry.exists(pid).await {
            Ok(true) => {}
            Ok(false) => return Outcome::ok(),
            Err(err) => return Outcome::failure(registry_unreachable(pid, &err)),
        }

        let still_in_use = self
            .associations
            .associations_for(&object.models())
            .iter()
            .any(|association| object.has_datastream(association.dsid()));
        if still_in_use {
            return Outcome::ok();
        }

        let handle_url = self.registry.canonical_url(pid);
        let dc = Dsid::dc();
        if object.has_datastream(&dc) {
            let content = match object.read_datastream(&dc).await {
                Ok(content) => content,
                Err(err) => return Outcome::failure(dc_update_failed(pid, &err)),
            };
            let mut document = match DublinCore::parse(&content) {
                Ok(document) => document,
                Err(err) => return Outcome::failure(dc_unparsable(pid, &err)),
            };
            if document.remove_identifier(&handle_url) {
                let serialized = match document.to_bytes() {
                    Ok(bytes) => bytes,
                    Err(err) => return Outcome::failure(dc_update_failed(pid, &err)),
                };
                if let Err(err) = object.write_datastream(&dc, serialized).await {
                    return Outcome::failure(dc_update_failed(pid, &err));
                }
            }
        }

        match self.registry.delete(pid).await {
            Ok(response)
                if response.code == HANDLE_DELETED || response.code == HANDLE_DELETE_CONFLICT =>
            {
                Outcome::ok()
            }
            Ok(response) => Outcome::failure(
                Message::operational_error("Error deleting handle for @pid: @error.")
                    .with_substitution("@pid", pid)
                    .with_substitution("@error", response.error_detail()),
            ),
            Err(err) => Outcome::failure(registry_unreachable(pid, &err)),
        }
    }
}

fn registry_unreachable(pid: &Pid, err: &ReconcileError) -> Message {
    Message::operational_error("Unable to query the handle registry for @pid: @error.")
        .with_substitution("@pid", pid)
        .with_substitution("@error", err)
}

fn dc_unparsable(pid: &Pid, err: &DcError) -> Message {
    Message::operational_error("Unable to parse the DC datastream on @pid: @error.")
        .with_substitution("@pid", pid)
        .with_substitution("@error", err)
}

fn dc_update_failed(pid: &Pid, err: &impl std::fmt::Display) -> Message {
    Message::operational_error("Unable to update the DC datastream on @pid: @error.")
        .with_substitution("@pid", pid)
        .with_substitution("@error", err)
}
