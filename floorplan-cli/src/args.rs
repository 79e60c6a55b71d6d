//! Parsers for repeatable command-line values.

use std::str::FromStr;

use floorplan_core::Tool;

/// A tap to replay: the tool to activate and where to tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapArg {
    /// Tool active for this tap.
    pub tool: Tool,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
}

impl FromStr for TapArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tool, point) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TOOL:X,Y, got {s:?}"))?;
        let (x, y) = point
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y after the tool, got {point:?}"))?;
        Ok(Self {
            tool: tool.trim().parse()?,
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
        })
    }
}

fn parse_coordinate(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid coordinate {s:?}: {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate must be finite, got {s:?}"))
    }
}

/// A catalog device to select, with an optional quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceArg {
    /// Catalog device id.
    pub id: u32,
    /// Units to select.
    pub quantity: u32,
}

impl FromStr for DeviceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, quantity)) => (id, Some(quantity)),
            None => (s, None),
        };
        let id = id
            .trim()
            .parse()
            .map_err(|e| format!("invalid device id {id:?}: {e}"))?;
        let quantity = match quantity {
            Some(q) => q
                .trim()
                .parse()
                .map_err(|e| format!("invalid quantity {q:?}: {e}"))?,
            None => 1,
        };
        if quantity == 0 {
            return Err(format!("quantity for device {id} must be at least 1"));
        }
        Ok(Self { id, quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tap() {
        let tap: TapArg = "door: 12.5, 40".parse().expect("tap");
        assert_eq!(tap.tool, Tool::Door);
        assert!((tap.x - 12.5).abs() < f32::EPSILON);
        assert!((tap.y - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_tap_errors() {
        assert!("room".parse::<TapArg>().is_err());
        assert!("room:1".parse::<TapArg>().is_err());
        assert!("sofa:1,2".parse::<TapArg>().is_err());
        assert!("room:x,2".parse::<TapArg>().is_err());
        assert!("room:inf,2".parse::<TapArg>().is_err());
    }

    #[test]
    fn test_parse_device() {
        assert_eq!(
            "7".parse::<DeviceArg>(),
            Ok(DeviceArg { id: 7, quantity: 1 })
        );
        assert_eq!(
            "1:3".parse::<DeviceArg>(),
            Ok(DeviceArg { id: 1, quantity: 3 })
        );
        assert!("1:0".parse::<DeviceArg>().is_err());
        assert!("lamp".parse::<DeviceArg>().is_err());
        assert!("1:-2".parse::<DeviceArg>().is_err());
    }
}
