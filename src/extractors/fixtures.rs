// src/extractors/fixtures.rs
//! Sample agent responses and the single demo scenario used across the tests.

use crate::extractors::catalog::CatalogEntry;
use crate::extractors::classifier::DetailSource;

pub const NUMBERED_BOLD_RESPONSE: &str = "The planning application 010001 is missing several required documents and fields based on the requirements document. Here are the missing items:

1. **Design and Access Statement**
   - **Design Rationale**: Provide detailed information about the design rationale.
   - **Materials and Appearance**: Provide detailed information about materials and appearance.
   - **Accessibility (if relevant)**: Provide detailed information about accessibility.

2. **Planning Statement**
   - **Summary of Proposed Works**: Provide detailed information about the summary of proposed works.
   - **Compliance with Local Policies**: Provide detailed information about compliance with local policies.

3. **Flood Risk Assessment**
   - **Flood Zone Identification**: Provide detailed information about flood zone identification.
   - **Mitigation Measures**: Provide detailed information about mitigation measures.
   - **Surface Water Drainage Plan**: Provide detailed information about the surface water drainage plan.

You can find the templates for these documents in the provided links.";

pub const INDENTED_RESPONSE: &str = "The planning application 10001 is missing several required documents and fields based on the requirements document. Here are the missing items:

    Design and Access Statement
        Design Rationale: Provide detailed information about the design rationale.
        Materials and Appearance: Provide detailed information about materials and appearance.

    Planning Statement
        Summary of Proposed Works: Provide detailed information about the summary of proposed works.
        Compliance with Local Policies: Provide detailed information about compliance with local policies.

    Flood Risk Assessment
        Flood Zone Identification: Provide detailed information about flood zone identification.

    Heritage Statement
        Description of Heritage Asset: Provide detailed information about the description of the heritage asset.
        Impact of Proposal: Provide detailed information about the impact of the proposal.
        Justification for Works: Provide detailed information about the justification for works.

    Tree Survey or Arboricultural Report
        Tree Locations and Species: Provide detailed information about tree locations and species.
        Root Protection Areas: Provide detailed information about root protection areas.
        Impact of Proposed Work: Provide detailed information about the impact of proposed work.

    Biodiversity or Ecology Report
        Habitat Impact: Provide detailed information about habitat impact.
        Protected Species: Provide detailed information about protected species.

You can find the templates for these documents below:

<list of document links>";

pub const LEGACY_RESPONSE: &str = "Summary of the outstanding items.

### Planning Statement
- **Summary of Proposed Works**: Describe the works
  in full.
- **Compliance with Local Policies**: Reference the local plan.

### Flood Risk Assessment
- **Flood Zone Identification**: State the flood zone.
";

pub const REPORT_RESPONSE: &str = "Application 10001 has been reviewed.

MISSING FIELDS
1. design_and_access_statement.txt
- Design Rationale
- Accessibility (if relevant)
2. planning_statement.txt
- Compliance with Local Policies
3. heritage_statement.txt

==========

## HOW TO FIX
**design_and_access_statement.txt**
- **Design Rationale:** Explain how the extension
  relates to the existing house.
- Accessibility: Describe step-free access.
`flood_risk_assessment.txt`
- Flood Zone: Not needed for this site.
planning_statement.txt
1. Cite policy H4 from the [local plan](https://example.org/plan).

DOCUMENT TEMPLATES
1. Design_and_Access_Statement.txt
Covers design rationale, materials and accessibility.
Use one section per heading.
2. planning_statement.txt
3. SAMPLE DOCUMENT: Heritage Statement (Listed Buildings)
------------------------------
Thank you.";

/// The hard-coded demo application: confirming substrings and the details shown for them.
const DEMO_SCENARIO: &[(&str, &[&str], &[&str])] = &[
    (
        "Application Form",
        &["John Smith"],
        &[
            "Applicant: John Smith",
            "Site: 12 Garden Lane, Anytown, AT1 2CD",
            "Description: Single-storey rear extension",
            "Certificate A - Sole owner",
        ],
    ),
    (
        "Location Plan",
        &["Map Scale: 1:1250"],
        &["Scale: 1:1250", "North Arrow: Present", "Site outlined in red", "Includes surrounding roads"],
    ),
    (
        "Block/Site Plan",
        &["Map Scale: 1:200"],
        &["Scale: 1:200", "Extension: 4m x 6m highlighted", "North Arrow: Present"],
    ),
    (
        "Elevations",
        &["Scale: 1:100", "Height"],
        &["Scale: 1:100", "Height: 3.2m", "Materials: Brick to match existing", "Front, Rear, and Side elevations"],
    ),
    (
        "Floor Plans",
        &["Existing Layout"],
        &["Scale: 1:100", "Existing: Kitchen, Living Room, Bathroom", "Proposed: Added Dining Area to Rear"],
    ),
    (
        "Ownership Certificate",
        &["Certificate A"],
        &["Certificate A: Sole owner", "Signed: John Smith", "Date: 30/05/2025"],
    ),
    (
        "Agricultural Holdings Certificate",
        &["not part of an agricultural holding"],
        &["Not part of agricultural holding", "Signed: John Smith", "Date: 30/05/2025"],
    ),
    (
        "CIL Form 1",
        &["Planning Application No: 10001"],
        &[
            "Application No: 10001",
            "Existing Floor Area: 100 sqm",
            "Proposed Floor Area: 120 sqm",
            "Development Type: Domestic Extension",
        ],
    ),
];

pub struct DemoScenarioDetails;

impl DetailSource for DemoScenarioDetails {
    fn details(&self, entry: &CatalogEntry, response_text: &str) -> Option<Vec<String>> {
        let (_, confirming, details) = DEMO_SCENARIO.iter().find(|(name, _, _)| *name == entry.name)?;
        confirming
            .iter()
            .all(|marker| response_text.contains(marker))
            .then(|| details.iter().map(|d| d.to_string()).collect())
    }
}
