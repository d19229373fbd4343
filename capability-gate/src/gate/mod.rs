//! The capability gate.
//!
//! Decides, per outgoing chat request, whether the extended-context beta
//! token should be appended to the request options. The decision short
//! circuits in a fixed order:
//! - provider must equal the policy's provider
//! - the API id must contain the family substring
//! - the API id must contain one of the supported variant patterns
//! - the token must not already be present
//!
//! Ineligible requests are passed through untouched. There is no error path.

pub mod policy;

use std::sync::Arc;

use gate_common::{Decision, ModelDescriptor, RequestOptions};
use serde_json::{Map, Value};

use crate::diagnostics::{DiagnosticLogger, NoopLogger};
pub use policy::{GatePolicy, SupportedModelSet, CONTEXT_1M_BETA};

/// Event name recorded for every decision.
pub const DECISION_EVENT: &str = "gate.decision";

/// Stateless decision function over a fixed policy.
///
/// Cheap to clone and safe to share between concurrent requests.
#[derive(Clone)]
pub struct CapabilityGate {
    policy: Arc<GatePolicy>,
    logger: Arc<dyn DiagnosticLogger>,
}

impl CapabilityGate {
    /// Gate with diagnostics disabled.
    pub fn new(policy: GatePolicy) -> Self {
        Self::with_logger(policy, Arc::new(NoopLogger))
    }

    pub fn with_logger(policy: GatePolicy, logger: Arc<dyn DiagnosticLogger>) -> Self {
        Self {
            policy: Arc::new(policy),
            logger,
        }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Classify a request without touching its options.
    pub fn decide(&self, model: &ModelDescriptor, options: &RequestOptions) -> Decision {
        let policy = &self.policy;

        if !model.is_complete() {
            return Decision::MissingIdentity;
        }
        if model.provider_id != policy.provider_id {
            return Decision::WrongProvider;
        }
        if !model.api_id.contains(policy.family.as_str()) {
            return Decision::WrongFamily;
        }
        if policy.supported_models.matching(&model.api_id).is_none() {
            return Decision::UnsupportedVariant;
        }
        if options.has_beta(&policy.feature_token) {
            return Decision::AlreadyPresent;
        }
        Decision::Injected
    }

    /// Apply the gate and return the effective options.
    pub fn apply(&self, model: &ModelDescriptor, options: RequestOptions) -> RequestOptions {
        self.apply_traced(model, options, None).0
    }

    /// Like [`apply`](Self::apply), also returning the decision. `request_id`
    /// is only used to correlate diagnostic records.
    pub fn apply_traced(
        &self,
        model: &ModelDescriptor,
        mut options: RequestOptions,
        request_id: Option<&str>,
    ) -> (RequestOptions, Decision) {
        let decision = self.decide(model, &options);
        if decision.is_injected() {
            options.push_beta(self.policy.feature_token.clone());
        }

        self.record(model, decision, request_id);
        (options, decision)
    }

    fn record(&self, model: &ModelDescriptor, decision: Decision, request_id: Option<&str>) {
        let mut context = Map::new();
        context.insert("provider_id".into(), Value::from(model.provider_id.as_str()));
        context.insert("api_id".into(), Value::from(model.api_id.as_str()));
        context.insert("decision".into(), Value::from(decision.as_str()));
        if let Some(id) = request_id {
            context.insert("request_id".into(), Value::from(id));
        }
        self.logger.record(DECISION_EVENT, &context);
    }
}

impl Default for CapabilityGate {
    fn default() -> Self {
        Self::new(GatePolicy::default())
    }
}

impl std::fmt::Debug for CapabilityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityGate")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
