use drive_core::gate::{one_of, required};
use drive_core::{FlowDefinition, FlowError, FormStep};

use super::phone_gate;

pub const EMERGENCY_TYPES: &[&str] = &["injury", "illness", "accident", "breathing", "other"];
pub const ASSISTANCE_TYPES: &[&str] = &["ambulance", "first_aid_guidance", "nearest_hospital"];

/// `type → assessment → contact → assistance`
pub fn medical_emergency() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::builder("medical_emergency").first_step(FormStep::new("type").titled("Emergency type")
                                                                                 .gate(one_of("emergencyType",
                                                                                              EMERGENCY_TYPES)))
                                                .add_step(FormStep::new("assessment").titled("Quick assessment")
                                                                                     .gate(required(&["conscious",
                                                                                                      "breathing"])))
                                                .add_step(FormStep::new("contact").titled("Contact details")
                                                                                  .gate(required(&["name"]))
                                                                                  .gate(phone_gate("phone")))
                                                .add_step(FormStep::new("assistance").titled("Assistance")
                                                                                     .gate(one_of("assistanceType",
                                                                                                  ASSISTANCE_TYPES)))
                                                .build()
}
