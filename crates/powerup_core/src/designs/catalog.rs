use super::DesignVariant;
use super::bcra::{BCRA3_2F, BCRA3_2R, BCRA4_2R, BCRA4_3F, BCRA4_3R};
use super::bira::{BIRA2_1C, BIRA2_1F, BIRA2_1R, BIRA3_1R, BIRA4_1R};
use super::cra::{CRA2_2R, CRA3_3R, CRA4_4R};
use super::ira::IRA;
use super::its::{ITS_NOCOMPARE, ITS_WCOMPARE};
use super::rd::{RD2_1F, RD2_1R, RD3_2F, RDC_2R, RDC_3R};

/// Every supported design, in workbook order
pub static CATALOG: [DesignVariant; 21] = [
    IRA,
    BIRA2_1C,
    BIRA2_1F,
    BIRA2_1R,
    BIRA3_1R,
    BIRA4_1R,
    CRA2_2R,
    CRA3_3R,
    CRA4_4R,
    BCRA3_2F,
    BCRA3_2R,
    BCRA4_2R,
    BCRA4_3F,
    BCRA4_3R,
    RD2_1F,
    RD2_1R,
    RDC_2R,
    RDC_3R,
    RD3_2F,
    ITS_NOCOMPARE,
    ITS_WCOMPARE,
];
