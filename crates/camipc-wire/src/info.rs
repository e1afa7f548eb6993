//! Camera descriptor record and its optional-block encoding.

use crate::error::{Result, WireError};
use crate::reader::ParcelReader;
use crate::writer::Parcel;

const PRESENT: i32 = 1;
const ABSENT: i32 = 0;

/// Direction a camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    Back,
    Front,
}

impl CameraFacing {
    pub fn from_wire(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Back),
            1 => Ok(Self::Front),
            other => Err(WireError::BadFacing(other)),
        }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            Self::Back => 0,
            Self::Front => 1,
        }
    }
}

/// Fixed descriptor for one camera: facing direction and mount orientation
/// in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraInfo {
    pub facing: CameraFacing,
    pub orientation: i32,
}

impl CameraInfo {
    /// Encode with the optional-block pattern: a presence marker (0 or 1)
    /// followed, only when present, by the facing and orientation fields.
    pub fn encode_opt(info: Option<&CameraInfo>, parcel: &mut Parcel) {
        match info {
            Some(info) => {
                parcel.write_i32(PRESENT);
                parcel.write_i32(info.facing.to_wire());
                parcel.write_i32(info.orientation);
            }
            None => parcel.write_i32(ABSENT),
        }
    }

    /// Decode the optional block. When the marker reads 0, nothing further
    /// is consumed and the fields must not be interpreted.
    pub fn decode_opt(reader: &mut ParcelReader<'_>) -> Result<Option<CameraInfo>> {
        match reader.read_i32()? {
            ABSENT => Ok(None),
            PRESENT => {
                let facing = CameraFacing::from_wire(reader.read_i32()?)?;
                let orientation = reader.read_i32()?;
                Ok(Some(CameraInfo {
                    facing,
                    orientation,
                }))
            }
            other => Err(WireError::BadPresence(other)),
        }
    }
}
