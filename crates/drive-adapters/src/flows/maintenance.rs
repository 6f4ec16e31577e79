use drive_core::gate::{predicate, required};
use drive_core::{FlowDefinition, FlowError, FormStep};
use serde_json::Value;

use super::flag;

/// `vehicle → service → pickup → slot`
///
/// `pickup` sólo aplica cuando se pidió recogida a domicilio.
pub fn schedule_maintenance() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::builder("schedule_maintenance").first_step(FormStep::new("vehicle").titled("Vehicle")
                                                                                       .gate(required(&["vehicleId"])))
                                                   .add_step(FormStep::new("service").titled("Services")
                                                                                     .gate(predicate("services",
                                                                                                     "select at least one service",
                                                                                                     |v: &Value| {
                                                                                                         v.as_array()
                                                                                                          .is_some_and(|a| !a.is_empty())
                                                                                                     })))
                                                   .add_step(FormStep::new("pickup").titled("Pickup address")
                                                                                    .applicable_when(|a| {
                                                                                        flag(a, "service", "pickupRequired")
                                                                                    })
                                                                                    .gate(required(&["address"])))
                                                   .add_step(FormStep::new("slot").titled("Date & time")
                                                                                  .gate(required(&["date", "time"])))
                                                   .build()
}
