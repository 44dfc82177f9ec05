use crate::protocol::parts::multiline_option_part::MultilineOptionPart;
use crate::protocol::parts::option_part::OptionId;

/// Topology information: one option set per server node.
pub type Topology = MultilineOptionPart<TopologyAttrId>;

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TopologyAttrId {
    #[default]
    HostName,         //  1 // host name
    HostPortNumber,   //  2 // port number
    TenantName,       //  3 // tenant name
    LoadFactor,       //  4 // load factor
    VolumeID,         //  5 // volume id
    IsMaster,         //  6 // master node in the system
    IsCurrentSession, //  7 // marks this location as valid for current session
    ServiceType,      //  8 // normal index server, not statserver/xsengine
    IsStandby,        // 10 // standby server
    SiteType,         // 13 // site type
    __Unexpected__(u8),
}

impl OptionId<TopologyAttrId> for TopologyAttrId {
    fn to_u8(&self) -> u8 {
        match *self {
            Self::HostName => 1,
            Self::HostPortNumber => 2,
            Self::TenantName => 3,
            Self::LoadFactor => 4,
            Self::VolumeID => 5,
            Self::IsMaster => 6,
            Self::IsCurrentSession => 7,
            Self::ServiceType => 8,
            Self::IsStandby => 10,
            Self::SiteType => 13,
            Self::__Unexpected__(i) => i,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => Self::HostName,
            2 => Self::HostPortNumber,
            3 => Self::TenantName,
            4 => Self::LoadFactor,
            5 => Self::VolumeID,
            6 => Self::IsMaster,
            7 => Self::IsCurrentSession,
            8 => Self::ServiceType,
            10 => Self::IsStandby,
            13 => Self::SiteType,
            val => {
                warn!("Invalid value for TopologyAttrId received: {val}");
                Self::__Unexpected__(val)
            }
        }
    }

    fn part_type(&self) -> &'static str {
        "Topology"
    }
}
