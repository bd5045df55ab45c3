//! CANaerospace parameter catalog
//!
//! Maps CAN identifiers to a descriptive parameter name and engineering unit.

use std::borrow::Cow;
use std::collections::HashMap;

/// Name and unit of a CAN identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: Cow<'static, str>,
    pub unit: Cow<'static, str>,
}

/// Returned for identifiers missing from the catalog
static UNKNOWN_PARAMETER: ParameterInfo = ParameterInfo {
    name: Cow::Borrowed("Unknown"),
    unit: Cow::Borrowed(""),
};

/// Standard CANaerospace identifier assignments
const STANDARD_PARAMETERS: &[(u32, &str, &str)] = &[
    // Flight Dynamics (0x12C-0x15C)
    (0x12C, "Body Longitudinal Acceleration", "m/s²"),
    (0x12D, "Body Lateral Acceleration", "m/s²"),
    (0x12E, "Body Normal Acceleration", "m/s²"),
    (0x12F, "Body Pitch Rate", "deg/s"),
    (0x130, "Body Roll Rate", "deg/s"),
    (0x131, "Body Yaw Rate", "deg/s"),
    (0x132, "Rudder Position", "deg"),
    (0x133, "Stabilizer Position", "deg"),
    (0x134, "Elevator Position", "deg"),
    (0x135, "Left Aileron Position", "deg"),
    (0x136, "Right Aileron Position", "deg"),
    (0x137, "Body Pitch Angle", "deg"),
    (0x138, "Body Roll Angle", "deg"),
    (0x139, "Body Sideslip", "deg"),
    (0x13A, "Altitude Rate", "m/s"),
    (0x13B, "Indicated Airspeed", "m/s"),
    (0x13C, "True Airspeed", "m/s"),
    (0x13D, "Calibrated Airspeed", "m/s"),
    (0x13E, "Mach Number", "Mach"),
    (0x13F, "Baro Correction", "hPa"),
    (0x140, "Baro Corrected Altitude", "m"),
    (0x141, "Heading Angle", "deg"),
    (0x142, "Standard Altitude", "m"),
    (0x143, "Total Air Temperature", "K"),
    (0x144, "Static Air Temperature", "K"),
    (0x145, "Differential Pressure", "hPa"),
    (0x146, "Static Pressure", "hPa"),
    (0x147, "Heading Rate", "deg/s"),
    (0x148, "Port Side Angle Of Attack", "deg"),
    (0x149, "Starbord Side Angle Of Attack", "deg"),
    (0x14A, "Density Altitude", "m"),
    (0x14B, "Turn Coordination Rate", "deg/s"),
    (0x14C, "True Altitude", "m"),
    (0x14D, "Wind Speed", "m/s"),
    (0x14E, "Wind Direction", "deg"),
    (0x14F, "Outside Air Temperature", "K"),
    (0x150, "Body Normal Velocity", "m/s"),
    (0x151, "Body Longitudinal Velocity", "m/s"),
    (0x152, "Body Lateral Velocity", "m/s"),
    (0x153, "Total Pressure", "hPa"),
    (0x154, "Flaps position", "deg"),
    (0x156, "Speed brake position", "deg"),
    (0x159, "Vertical speed of the airmass", "m/s"),
    (0x15C, "TEK altitude rate", "m/s"),
    // Flight Controls (0x190-0x1BA)
    (0x190, "Pitch Control Position", "deg"),
    (0x191, "Roll Control Position", "deg"),
    (0x192, "Lateral Stick Trim Position Command", "deg"),
    (0x193, "Yaw Control Position", "deg"),
    (0x194, "Collective Control Position", "deg"),
    (0x195, "Longitudinal Stick Trim Position Command", "deg"),
    (0x196, "Directional Pedals Trim Position Command", "deg"),
    (0x197, "Collective Lever Trim Position Command", "deg"),
    (0x198, "Cyclic Control Stick Switches", "enum"),
    (0x199, "Lateral Trim Speed", "deg/s"),
    (0x19A, "Longitudinal Trim Speed", "deg/s"),
    (0x19B, "Pedal Trim Speed", "deg/s"),
    (0x19C, "Collective Trim Speed", "deg/s"),
    (0x19D, "Nose Wheel Steering Handle Position", "deg"),
    (0x19E, "Engine 1 Throttle Lever Position Ecs Channel A", "%"),
    (0x19F, "Engine 2 Throttle Lever Position Ecs Channel A", "%"),
    (0x1AE, "Flaps Lever Position", "deg"),
    (0x1AF, "Slats Lever Position", "deg"),
    (0x1B0, "Park Brake Lever Position", "enum"),
    (0x1B1, "Speedbrake Lever Position", "deg"),
    (0x1B2, "Throttle Max Lever Position", "%"),
    (0x1B3, "Pilot Left Brake Pedal Position", "%"),
    (0x1B4, "Pilot Right Brake Pedal Position", "%"),
    (0x1B5, "Copilot Left Brake Pedal Position", "%"),
    (0x1B6, "Copilot Right Brake Pedal Position", "%"),
    (0x1B7, "Trim System Switches", "enum"),
    (0x1B8, "Trim System Lights", "enum"),
    (0x1B9, "Collective Control Stick Switches", "enum"),
    (0x1BA, "Stick Shaker Stall Warning Device", "enum"),
    // Propulsion/Engine (0x1F4-0x2BB)
    (0x1F4, "Engine 1 N1 Ecs Channel A", "%"),
    (0x1F5, "Engine 2 N1 Ecs Channel A", "%"),
    (0x294, "Fuel Pump 1 Flow Rate", "L/h"),
    (0x295, "Fuel Pump 2 Flow Rate", "L/h"),
    // Navigation/GPS (0x3E8-0x44F)
    (0x3E8, "Active Nav System Waypoint Latitude", "deg"),
    (0x3E9, "Active Nav System Waypoint Longitude", "deg"),
    (0x3EA, "Active Nav System Waypoint Height Above Ellipsoid", "m"),
    (0x3EB, "Active Nav System Waypoint Altitude", "m"),
    (0x3EC, "Active Nav System Ground Speed", "m/s"),
    (0x3ED, "Active Nav System True Track", "deg"),
    (0x3EE, "Active Nav System Magnetic Track", "deg"),
    (0x3EF, "Active Nav System Cross Track Error", "m"),
    (0x3F0, "Active Nav System Track Error Angle", "deg"),
    (0x3F1, "Active Nav System Time To Go", "s"),
    (0x3F2, "Active Nav System Estimated Time Of Arrival", "timestamp"),
    (0x3F3, "Active Nav System Estimated Enroute Time", "s"),
    (0x3F4, "Gps Aircraft Latitude", "deg"),
    (0x3F5, "Gps Aircraft Longitude", "deg"),
    (0x3F6, "Gps Aircraft Height Above Ellipsoid", "m"),
    (0x3F7, "Gps Ground Speed", "m/s"),
    (0x3F8, "Gps True Track", "deg"),
    (0x3F9, "Gps Magnetic Track", "deg"),
    (0x3FA, "Gps Cross Track Error", "m"),
    (0x3FB, "Gps Track Error Angle", "deg"),
    (0x3FC, "Gps Glideslope Deviation", "deg"),
    (0x3FD, "Gps Predicted Raim", "enum"),
    (0x3FE, "Gps Vertical Figure Of Merit", "m"),
    (0x3FF, "Gps Horizontal Figure Of Merit", "m"),
    (0x400, "Gps Mode Of Operation", "enum"),
    // Electrical/Hydraulic (0x320-0x3CF)
    (0x320, "Hydraulic System 1 Pressure", "kPa"),
    (0x321, "Hydraulic System 2 Pressure", "kPa"),
    // Time/Miscellaneous (0x4B0-0x4B6)
    (0x4B0, "Utc", "timestamp"),
    (0x4B1, "Cabin Pressure", "hPa"),
    (0x4B2, "Cabin Altitude", "m"),
    (0x4B3, "Cabin Temperature", "°C"),
    (0x4B4, "Longitudinal Center Of Gravity", "m"),
    (0x4B5, "Lateral Center Of Gravity", "m"),
    (0x4B6, "Date", "date"),
];

/// Immutable identifier catalog
///
/// Extended (if at all) before the decoder is constructed; the decoder only
/// ever reads from it.
#[derive(Debug, Clone)]
pub struct ParameterCatalog {
    entries: HashMap<u32, ParameterInfo>,
}

impl ParameterCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build the catalog with the standard CANaerospace assignments
    pub fn standard() -> Self {
        let entries = STANDARD_PARAMETERS
            .iter()
            .map(|&(id, name, unit)| {
                (
                    id,
                    ParameterInfo {
                        name: Cow::Borrowed(name),
                        unit: Cow::Borrowed(unit),
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Builder method: add or replace one entry
    pub fn with_entry(mut self, id: u32, name: impl Into<String>, unit: impl Into<String>) -> Self {
        let info = ParameterInfo {
            name: Cow::Owned(name.into()),
            unit: Cow::Owned(unit.into()),
        };
        if self.entries.insert(id, info).is_some() {
            log::debug!("Parameter 0x{:X} overridden", id);
        }
        self
    }

    /// Look up an identifier; misses resolve to ("Unknown", "")
    pub fn lookup(&self, id: u32) -> &ParameterInfo {
        self.entries.get(&id).unwrap_or(&UNKNOWN_PARAMETER)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
