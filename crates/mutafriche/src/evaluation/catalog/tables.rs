//! Hand-authored impact tables.
//!
//! Every row lists one impact per use case in `Usage::ALL` order:
//! residential, public facilities, culture, tertiary, industry, renaturation, solar.

use super::numeric::{Bound, NumericBucket, NumericRule};
use super::UsageImpacts;
use crate::evaluation::domain::{
    AccessRoadQuality, ArchitecturalValue, BuildingCondition, EnvironmentalZoning,
    GreenBlueCorridor, HazardLevel, HeritageZoning, ImpactScore, KnownPollution,
    LandscapeQuality, OwnershipType, RegulatoryZoning, WaterConnection,
};

const VNEG: ImpactScore = ImpactScore::VeryNegative;
const NEG: ImpactScore = ImpactScore::Negative;
const NEUT: ImpactScore = ImpactScore::Neutral;
const POS: ImpactScore = ImpactScore::Positive;
const VPOS: ImpactScore = ImpactScore::VeryPositive;

const fn row(impacts: [ImpactScore; 7]) -> UsageImpacts {
    UsageImpacts::new(impacts)
}

const fn bucket(label: &'static str, impacts: [ImpactScore; 7]) -> NumericBucket {
    NumericBucket {
        label,
        impacts: row(impacts),
    }
}

pub(crate) static SITE_AREA: NumericRule = NumericRule {
    bounded: &[
        (
            Bound::Below(10_000.0),
            bucket("< 10 000 m²", [POS, POS, POS, POS, VNEG, NEUT, NEG]),
        ),
        (
            Bound::Below(15_000.0),
            bucket("< 15 000 m²", [POS, POS, NEUT, POS, NEG, NEUT, NEG]),
        ),
        (
            Bound::AtMost(50_000.0),
            bucket("≤ 50 000 m²", [NEUT, NEUT, NEUT, NEUT, POS, POS, POS]),
        ),
    ],
    beyond: bucket("> 50 000 m²", [NEG, NEG, NEG, NEG, VPOS, VPOS, VPOS]),
};

pub(crate) static BUILT_AREA: NumericRule = NumericRule {
    bounded: &[
        (
            Bound::Below(10_000.0),
            bucket("< 10 000 m²", [NEUT, NEUT, NEUT, NEUT, NEUT, POS, POS]),
        ),
        (
            Bound::AtMost(50_000.0),
            bucket("≤ 50 000 m²", [POS, POS, POS, POS, POS, NEG, NEG]),
        ),
    ],
    beyond: bucket("> 50 000 m²", [NEG, NEUT, POS, NEUT, POS, VNEG, VNEG]),
};

pub(crate) static HOUSING_VACANCY_RATE: NumericRule = NumericRule {
    bounded: &[
        (
            Bound::Below(4.0),
            bucket("< 4 %", [VPOS, NEUT, NEUT, POS, NEUT, NEG, NEUT]),
        ),
        (
            Bound::AtMost(10.0),
            bucket("≤ 10 %", [NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        ),
    ],
    beyond: bucket("> 10 %", [VNEG, NEUT, NEUT, NEG, NEUT, POS, NEUT]),
};

pub(crate) static HIGHWAY_DISTANCE: NumericRule = NumericRule {
    bounded: &[
        (
            Bound::Below(1_000.0),
            bucket("< 1 km", [NEG, NEUT, NEUT, POS, VPOS, NEG, NEUT]),
        ),
        (
            Bound::AtMost(2_000.0),
            bucket("≤ 2 km", [NEUT, NEUT, NEUT, POS, POS, NEUT, NEUT]),
        ),
        (
            Bound::AtMost(5_000.0),
            bucket("≤ 5 km", [NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        ),
    ],
    beyond: bucket("> 5 km", [POS, NEUT, NEUT, NEG, VNEG, POS, NEUT]),
};

pub(crate) static TRANSIT_DISTANCE: NumericRule = NumericRule {
    bounded: &[(
        Bound::Below(500.0),
        bucket("< 500 m", [VPOS, VPOS, POS, VPOS, NEUT, NEUT, NEG]),
    )],
    beyond: bucket("≥ 500 m", [NEG, NEG, NEUT, NEG, NEUT, NEUT, POS]),
};

pub(crate) static GRID_CONNECTION_DISTANCE: NumericRule = NumericRule {
    bounded: &[
        (
            Bound::Below(1_000.0),
            bucket("< 1 km", [NEUT, NEUT, NEUT, NEUT, POS, NEUT, VPOS]),
        ),
        (
            Bound::AtMost(5_000.0),
            bucket("≤ 5 km", [NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        ),
    ],
    beyond: bucket("> 5 km", [NEUT, NEUT, NEUT, NEUT, NEG, NEUT, VNEG]),
};

pub(crate) fn town_centre(inside: bool) -> UsageImpacts {
    if inside {
        row([VPOS, VPOS, POS, POS, NEG, NEUT, VNEG])
    } else {
        row([NEG, NEG, NEUT, NEUT, POS, POS, POS])
    }
}

pub(crate) fn shops_and_services(nearby: bool) -> UsageImpacts {
    if nearby {
        row([VPOS, POS, POS, POS, NEUT, NEUT, NEUT])
    } else {
        row([NEG, NEUT, NEUT, NEUT, NEUT, POS, POS])
    }
}

pub(crate) fn technological_risk(present: bool) -> UsageImpacts {
    if present {
        row([VNEG, VNEG, NEG, NEG, NEUT, POS, POS])
    } else {
        row([POS, POS, POS, POS, NEUT, NEUT, NEUT])
    }
}

pub(crate) fn natural_hazard(level: HazardLevel) -> UsageImpacts {
    match level {
        HazardLevel::None => row([POS, POS, POS, POS, POS, NEUT, NEUT]),
        HazardLevel::Low => row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        HazardLevel::Medium => row([NEG, NEG, NEUT, NEUT, NEUT, POS, NEUT]),
        HazardLevel::Strong => row([VNEG, VNEG, NEG, NEG, NEG, VPOS, NEG]),
    }
}

pub(crate) fn pollution_detected(flagged: bool) -> UsageImpacts {
    if flagged {
        row([NEG, NEG, NEG, NEUT, NEUT, NEUT, POS])
    } else {
        row([POS, POS, NEUT, NEUT, NEUT, NEUT, NEUT])
    }
}

pub(crate) fn environmental_zoning(zoning: EnvironmentalZoning) -> UsageImpacts {
    match zoning {
        EnvironmentalZoning::None => row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        EnvironmentalZoning::Natura2000 => row([NEG, NEG, NEUT, NEG, VNEG, VPOS, NEG]),
        EnvironmentalZoning::Znieff => row([NEG, NEG, NEUT, NEG, NEG, POS, NEG]),
        EnvironmentalZoning::ProtectedArea => row([VNEG, VNEG, NEG, VNEG, VNEG, VPOS, VNEG]),
    }
}

pub(crate) fn regulatory_zoning(zoning: RegulatoryZoning) -> UsageImpacts {
    match zoning {
        RegulatoryZoning::Urban => row([VPOS, VPOS, POS, VPOS, NEUT, NEG, NEG]),
        RegulatoryZoning::ToUrbanise => row([POS, POS, NEUT, POS, POS, NEG, NEG]),
        RegulatoryZoning::EconomicActivity => row([NEG, NEUT, NEUT, POS, VPOS, NEG, POS]),
        RegulatoryZoning::NaturalOrAgricultural => row([VNEG, NEG, NEUT, VNEG, VNEG, VPOS, POS]),
        RegulatoryZoning::NoPlanningDocument => row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
    }
}

pub(crate) fn heritage_zoning(zoning: HeritageZoning) -> UsageImpacts {
    match zoning {
        HeritageZoning::None => row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT]),
        HeritageZoning::MonumentSurroundings => row([NEUT, POS, POS, NEUT, NEG, NEUT, VNEG]),
        HeritageZoning::RemarkableHeritageSite => row([NEG, POS, VPOS, NEUT, VNEG, NEUT, VNEG]),
    }
}

pub(crate) fn ownership(owner: OwnershipType) -> Option<UsageImpacts> {
    match owner {
        OwnershipType::Public => Some(row([NEUT, VPOS, POS, NEUT, NEUT, POS, POS])),
        OwnershipType::Private => Some(row([POS, NEG, NEUT, POS, POS, NEG, NEUT])),
        OwnershipType::SharedOwnership => Some(row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT])),
        OwnershipType::Unknown => None,
    }
}

pub(crate) fn water_connection(connection: WaterConnection) -> Option<UsageImpacts> {
    match connection {
        WaterConnection::Connected => Some(row([POS, POS, POS, POS, POS, NEUT, NEUT])),
        WaterConnection::NotConnected => Some(row([NEG, NEG, NEG, NEG, NEG, POS, NEUT])),
        WaterConnection::Unknown => None,
    }
}

pub(crate) fn building_condition(condition: BuildingCondition) -> Option<UsageImpacts> {
    match condition {
        BuildingCondition::Good => Some(row([VPOS, VPOS, VPOS, VPOS, POS, VNEG, VNEG])),
        BuildingCondition::Degraded => Some(row([NEUT, NEUT, NEUT, NEUT, NEUT, NEG, NEG])),
        BuildingCondition::Ruined => Some(row([VNEG, NEG, NEG, VNEG, NEG, POS, NEUT])),
        BuildingCondition::NoBuildings => Some(row([NEUT, NEUT, NEUT, NEUT, POS, VPOS, VPOS])),
        BuildingCondition::Unknown => None,
    }
}

pub(crate) fn known_pollution(pollution: KnownPollution) -> Option<UsageImpacts> {
    match pollution {
        KnownPollution::None => Some(row([VPOS, VPOS, POS, POS, NEUT, POS, NEUT])),
        KnownPollution::AlreadyManaged => Some(row([POS, POS, NEUT, NEUT, NEUT, NEUT, NEUT])),
        KnownPollution::VolatileCompounds => Some(row([VNEG, VNEG, NEG, NEG, NEUT, NEG, POS])),
        KnownPollution::OtherCompounds => Some(row([NEG, NEG, NEG, NEUT, NEUT, NEG, POS])),
        KnownPollution::Unknown => None,
    }
}

pub(crate) fn architectural_value(value: ArchitecturalValue) -> Option<UsageImpacts> {
    match value {
        ArchitecturalValue::Exceptional => Some(row([POS, VPOS, VPOS, POS, VNEG, NEG, VNEG])),
        ArchitecturalValue::Interesting => Some(row([POS, POS, POS, POS, NEG, NEUT, NEG])),
        ArchitecturalValue::Ordinary => Some(row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT])),
        ArchitecturalValue::NoInterest => Some(row([NEG, NEG, NEG, NEUT, POS, POS, POS])),
        ArchitecturalValue::Unknown => None,
    }
}

pub(crate) fn landscape_quality(quality: LandscapeQuality) -> Option<UsageImpacts> {
    match quality {
        LandscapeQuality::Remarkable => Some(row([POS, POS, VPOS, POS, NEG, VPOS, VNEG])),
        LandscapeQuality::Interesting => Some(row([POS, POS, POS, NEUT, NEUT, POS, NEG])),
        LandscapeQuality::Ordinary => Some(row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT])),
        LandscapeQuality::Degraded => Some(row([NEG, NEG, NEG, NEUT, POS, NEUT, POS])),
        LandscapeQuality::Unknown => None,
    }
}

pub(crate) fn access_road(quality: AccessRoadQuality) -> Option<UsageImpacts> {
    match quality {
        AccessRoadQuality::Accessible => Some(row([POS, POS, POS, POS, VPOS, NEUT, NEUT])),
        AccessRoadQuality::Degraded => Some(row([NEG, NEG, NEG, NEG, NEG, NEUT, NEUT])),
        AccessRoadQuality::Inaccessible => Some(row([VNEG, VNEG, VNEG, VNEG, VNEG, POS, NEG])),
        AccessRoadQuality::Unknown => None,
    }
}

pub(crate) fn green_blue_corridor(corridor: GreenBlueCorridor) -> Option<UsageImpacts> {
    match corridor {
        GreenBlueCorridor::Outside => Some(row([NEUT, NEUT, NEUT, NEUT, NEUT, NEUT, NEUT])),
        GreenBlueCorridor::EcologicalCorridor => Some(row([NEG, NEG, NEUT, NEG, VNEG, VPOS, NEG])),
        GreenBlueCorridor::BiodiversityReservoir => {
            Some(row([VNEG, VNEG, NEG, VNEG, VNEG, VPOS, VNEG]))
        }
        GreenBlueCorridor::Unknown => None,
    }
}
