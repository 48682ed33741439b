use crate::core::ComplexityTier;
use crate::plugins::PluginVerdict;

/// Capabilities whose presence means the pipeline builds a container image
/// and therefore needs a packaging stage.
const CONTAINER_CAPABILITIES: &[&str] = &["docker", "kubernetes"];

/// Decision table mapping the complexity tier to a stage sequence. The
/// stage count scales with actual complexity instead of always emitting a
/// maximal skeleton: packaging appears only with a containerization
/// verdict, deployment for anything above the lowest tier, cleanup only at
/// the highest.
pub fn stage_plan(tier: ComplexityTier, verdicts: &[PluginVerdict]) -> Vec<&'static str> {
    let mut stages = vec!["build", "test"];

    if verdicts
        .iter()
        .any(|v| CONTAINER_CAPABILITIES.contains(&v.id.as_str()))
    {
        stages.push("package");
    }
    if tier != ComplexityTier::Simple {
        stages.push("deploy");
    }
    if tier == ComplexityTier::Complex {
        stages.push("cleanup");
    }

    stages
}
