use drive_core::gate::{min_attachments, required};
use drive_core::{FlowDefinition, FlowError, FormStep};

use super::{flag, phone_gate};

/// `incident → evidence → police_report → contact`
///
/// `police_report` sólo aplica si el usuario indicó `reportedToPolice`.
pub fn theft_emergency() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::builder("theft_emergency").first_step(FormStep::new("incident").titled("What happened")
                                                                                   .gate(required(&["location",
                                                                                                    "incidentTime"])))
                                              .add_step(FormStep::new("evidence").titled("Evidence")
                                                                                 .gate(min_attachments(None, 1)))
                                              .add_step(FormStep::new("police_report").titled("Police report")
                                                                                      .applicable_when(|a| {
                                                                                          flag(a,
                                                                                               "incident",
                                                                                               "reportedToPolice")
                                                                                      })
                                                                                      .gate(required(&["firNumber",
                                                                                                       "policeStation"])))
                                              .add_step(FormStep::new("contact").titled("Contact details")
                                                                                .gate(phone_gate("phone")))
                                              .build()
}
