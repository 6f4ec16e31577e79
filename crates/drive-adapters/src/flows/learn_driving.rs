use drive_core::gate::{must_be_true, one_of, required};
use drive_core::{FlowDefinition, FlowError, FormStep};

use super::phone_gate;

pub const VEHICLE_TYPES: &[&str] = &["two_wheeler", "car", "heavy"];
pub const PACKAGES: &[&str] = &["basic", "standard", "premium"];

/// `vehicle → package → schedule → details`
pub fn learn_driving() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::builder("learn_driving").first_step(FormStep::new("vehicle").titled("Vehicle")
                                                                                .gate(one_of("vehicleType",
                                                                                             VEHICLE_TYPES)))
                                            .add_step(FormStep::new("package").titled("Package")
                                                                              .gate(one_of("package", PACKAGES)))
                                            .add_step(FormStep::new("schedule").titled("Schedule")
                                                                               .gate(required(&["startDate",
                                                                                                "timeSlot"])))
                                            .add_step(FormStep::new("details").titled("Your details")
                                                                              .gate(required(&["name"]))
                                                                              .gate(phone_gate("phone"))
                                                                              .gate(must_be_true("acceptTerms",
                                                                                                 "accept the terms to book")))
                                            .build()
}
