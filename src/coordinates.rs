//! Hand-measured positions for every drawable slot of the E-SOC template.
//!
//! Pages are zero-based; `x`/`y` are measured from the top-left corner of the
//! printed page. Slots without a size fall back to the 12pt default.

use crate::registry::FieldDescriptor as F;

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

pub static FIELDS: &[F] = &[
    // Consent checkboxes
    F::checkbox(0, "consentForCare", 38.0, 198.0),
    F::checkbox(0, "releaseOfInfo", 38.0, 282.0),
    F::checkbox(0, "financialAgreement", 38.0, 410.0),
    F::checkbox(0, "patientRightAndResponsibilities", 38.0, 591.0),
    F::checkbox(0, "advanceDirectives", 38.0, 661.0),
    F::checkbox(0, "advanceDirectives1", 73.0, 704.0),
    F::checkbox(0, "advanceDirectives2", 73.0, 720.0),
    F::checkbox(0, "advanceDirectives3", 73.0, 735.0),
    F::checkbox(1, "photographicRelease", 38.0, 97.0),
    F::checkbox(1, "billingAlert", 38.0, 154.0),
    F::checkbox(1, "frequncyVisitVerification", 38.0, 212.0),
    F::checkbox(1, "provisionTherapy", 38.0, 269.0),
    F::checkbox(1, "translaterAvalability", 38.0, 383.0),
    F::checkbox(1, "homeSafety", 38.0, 441.0),
    F::checkbox(1, "hippaNotice", 38.0, 484.0),
    // Relevant healthcare info
    F::checkbox(7, "dailyServicesNo", 230.0, 246.0),
    F::checkbox(7, "dailyServicesYes", 286.0, 246.0),
    F::checkbox(7, "lifeSustainingNo", 160.0, 289.0),
    F::checkbox(7, "lifeSustainingYes", 209.0, 289.0),
    F::checkbox(7, "otherTherapyNo", 132.0, 317.0),
    F::checkbox(7, "otherTherapyYes", 180.0, 317.0),
    F::checkbox(7, "patientIndependentNo", 195.0, 347.0),
    F::checkbox(7, "patientIndependentYes", 246.0, 347.0),
    F::checkbox(7, "ventilatorDependentNo", 149.0, 361.0),
    F::checkbox(7, "ventilatorDependentYes", 204.0, 361.0),
    F::checkbox(7, "dialysisNo", 90.0, 375.0),
    F::checkbox(7, "dialysisYes", 141.0, 375.0),
    F::checkbox(7, "tubeFeedingNo", 117.0, 404.0),
    F::checkbox(7, "tubeFeedingYes", 166.0, 404.0),
    F::checkbox(7, "patientIndependentMedicationNo", 357.0, 433.0),
    F::checkbox(7, "patientIndependentMedicationYes", 410.0, 433.0),
    // Functional disabilities
    F::checkbox(7, "walkerOrCane", 235.0, 448.0),
    F::checkbox(7, "wheelChair", 332.0, 448.0),
    F::checkbox(7, "bedBound", 426.0, 448.0),
    F::checkbox(7, "hearingImparment", 42.0, 462.0),
    F::checkbox(7, "visualImparment", 166.0, 462.0),
    F::checkbox(7, "mentalOrConginitiveImparment", 282.0, 462.0),
    // Emergency plan
    F::checkbox(7, "patientEvacuateToRelative", 230.0, 522.0),
    F::checkbox(7, "patientEvacuateToFriend", 270.0, 522.0),
    F::checkbox(7, "patientWithSpecialNeedShelterNo", 261.0, 581.0),
    F::checkbox(7, "patientWithSpecialNeedShelterYes", 312.0, 581.0),
    // Pressure ulcer risk scale
    F::checkbox(10, "physicalConditionValue1", 359.0, 244.0),
    F::checkbox(10, "physicalConditionValue2", 359.0, 258.0),
    F::checkbox(10, "physicalConditionValue3", 359.0, 275.0),
    F::checkbox(10, "physicalConditionValue4", 359.0, 290.0),
    F::checkbox(10, "mentalConditionValue1", 359.0, 313.0),
    F::checkbox(10, "mentalConditionValue2", 359.0, 326.0),
    F::checkbox(10, "mentalConditionValue3", 359.0, 342.0),
    F::checkbox(10, "mentalConditionValue4", 359.0, 356.0),
    F::checkbox(10, "acitivityValue1", 359.0, 376.0),
    F::checkbox(10, "acitivityValue2", 359.0, 391.0),
    F::checkbox(10, "acitivityValue3", 359.0, 407.0),
    F::checkbox(10, "acitivityValue4", 359.0, 423.0),
    F::checkbox(10, "mobilityValue1", 359.0, 444.0),
    F::checkbox(10, "mobilityValue2", 359.0, 461.0),
    F::checkbox(10, "mobilityValue3", 359.0, 473.0),
    F::checkbox(10, "mobilityValue4", 359.0, 491.0),
    F::checkbox(10, "incontinenceValue1", 359.0, 509.0),
    F::checkbox(10, "incontinenceValue2", 359.0, 525.0),
    F::checkbox(10, "incontinenceValue3", 359.0, 542.0),
    F::checkbox(10, "incontinenceValue4", 359.0, 555.0),
    // Vaccine questionnaire: flu
    F::checkbox(9, "fluVaccineYes", 38.0, 168.0),
    F::checkbox(9, "fluVaccineNo", 275.0, 168.0),
    F::checkbox(9, "fluAgeGreater65", 49.0, 179.0),
    F::checkbox(9, "fluAgeBetween50To64", 49.0, 190.0),
    F::checkbox(9, "fluPersonal", 49.0, 202.0),
    F::checkbox(9, "fluOther", 49.0, 212.0),
    F::checkbox(9, "fluVaccineByAgencyNurse", 38.0, 238.0),
    F::checkbox(9, "fluReferredToPhysician", 38.0, 253.0),
    F::checkbox(9, "fluReferredToHealthDepartment", 38.0, 267.0),
    F::checkbox(9, "fluVaccinationArrangedAtHome", 38.0, 281.0),
    F::checkbox(9, "fluRecentlyGot", 297.0, 179.0),
    F::checkbox(9, "fluAllergicToEggs", 297.0, 190.0),
    F::checkbox(9, "fluReactionToFluShot", 297.0, 202.0),
    F::checkbox(9, "fluPersonalNo", 297.0, 212.0),
    // Vaccine questionnaire: pneumonia
    F::checkbox(9, "pneumoniaVaccineYes", 38.0, 340.0),
    F::checkbox(9, "pneumoniaVaccineNo", 275.0, 340.0),
    F::checkbox(9, "pneumoniaAgeGreater65", 49.0, 351.0),
    F::checkbox(9, "pneumoniaChronicHealthProblem", 49.0, 362.0),
    F::checkbox(9, "pneumoniaPersonal", 49.0, 385.0),
    F::checkbox(9, "pneumoniaVaccineByAgencyNurse", 38.0, 410.0),
    F::checkbox(9, "pneumoniaReferredToPhysician", 38.0, 425.0),
    F::checkbox(9, "pneumoniaReferredToHealthDepartment", 38.0, 439.0),
    F::checkbox(9, "pneumoniaVaccinationArrangedAtHome", 38.0, 453.0),
    F::checkbox(9, "pneumoniaRecentlyGot", 396.0, 351.0),
    F::checkbox(9, "pneumoniaPersonalNo", 396.0, 374.0),
    // Vaccine administration and follow-up
    F::checkbox(9, "fluVaccine", 38.0, 503.0),
    F::checkbox(9, "pneumoniaVaccine", 116.0, 503.0),
    F::checkbox(9, "fluOutcome", 38.0, 592.0),
    F::checkbox(9, "pneumoniaOutcome", 115.0, 592.0),
    F::checkbox(9, "vaccineRelatedReactionYes", 176.0, 605.0),
    F::checkbox(9, "vaccineRelatedReactionNo", 220.0, 605.0),
    // Advance directives
    F::checkbox(14, "advanceDirectivesInfo", 74.0, 265.0),
    F::checkbox(14, "advanceDirectivesExecute", 74.0, 289.0),
    F::checkbox(14, "advanceDirectivesLivingWill", 74.0, 314.0),
    F::checkbox(14, "advanceDirectivesLivingWillYes", 341.0, 315.0),
    F::checkbox(14, "advanceDirectivesLivingWillNo", 385.0, 315.0),
    F::checkbox(14, "advanceDirectivesCopyObtainedYes", 341.0, 330.0),
    F::checkbox(14, "advanceDirectivesCopyObtainedNo", 385.0, 330.0),
    F::checkbox(14, "durablePowerAttorney", 74.0, 431.0),
    F::checkbox(14, "durablePowerAttorneyYes", 341.0, 431.0),
    F::checkbox(14, "durablePowerAttorneyNo", 382.0, 431.0),
    F::checkbox(14, "haveAdvanceDirectives", 74.0, 469.0),
    F::checkbox(14, "haveAdvanceDirectivesYes", 341.0, 470.0),
    F::checkbox(14, "haveAdvanceDirectivesNo", 385.0, 470.0),
    F::checkbox(14, "haveAdvanceDirectivesCopyYes", 341.0, 484.0),
    F::checkbox(14, "haveAdvanceDirectivesCopyNo", 385.0, 484.0),
    // Page 1: consent
    F::text(0, "patientName", 121.0, 168.0).size(12.0),
    F::text(0, "socialSecurity", 382.0, 168.0),
    F::text(0, "financialAgreementInput", 47.0, 534.0)
        .size(15.0)
        .flag_text("financialAgreement", "X"),
    // Page 2: consent signatures
    F::text(1, "relationshipIfNotPatient", 385.0, 550.0),
    F::text(1, "reasonUnableToSign", 37.0, 594.0),
    F::date(1, "dateIfNotPatient", 385.0, 594.0),
    F::date(1, "rnDate", 385.0, 636.0),
    F::signature(1, "rnSignature", 38.0, 610.0),
    F::signature(1, "patientSignature", 38.0, 528.0),
    // Page 5: clinical manager
    F::text(4, "clinicalManager", 240.0, 577.0),
    F::text(4, "clinicalManagerContactInfo", 172.0, 593.0),
    // Page 7: patient rights
    F::signature(6, "patientSignature", 36.0, 525.0).from("patientRightsPatientSignature"),
    F::date(6, "patientSignatureDate", 81.0, 566.0).size(11.0),
    F::signature(6, "representativeSignature", 352.0, 525.0),
    F::date(6, "representativeSignatureDate", 410.0, 566.0).size(11.0),
    F::signature(6, "agencyRepresentativeSignature", 36.0, 609.0),
    F::date(6, "agencyRepresentativeSignatureDate", 81.0, 640.0)
        .size(11.0)
        .from("agencyRepresentativeDate"),
    // Page 8: emergency preparedness
    F::text(7, "patientName", 92.0, 141.0).size(11.0),
    F::date(7, "socDate", 420.0, 141.0),
    F::text(7, "phoneNumber", 101.0, 155.0).size(11.0),
    F::text(7, "physician", 369.0, 155.0).size(11.0),
    F::text(7, "address", 65.0, 169.0).size(11.0),
    F::text(7, "city", 48.0, 184.0).size(11.0),
    F::text(7, "state", 357.0, 184.0).size(11.0),
    F::text(7, "zip", 479.0, 184.0).size(11.0),
    F::text(7, "dailyServicesYesDescription", 100.0, 259.0).size(11.0),
    F::text(7, "lifeSustainingDesc", 100.0, 302.0).size(11.0),
    F::text(7, "otherTherapyDesc", 100.0, 331.0).size(11.0),
    F::text(7, "dialysisDesc", 100.0, 388.0).size(11.0),
    F::text(7, "tubeFeedingDesc", 100.0, 418.0).size(11.0),
    F::text(7, "primaryDx", 82.0, 231.0).size(11.0),
    F::text(7, "secondaryDx", 386.0, 231.0).size(11.0),
    F::text(7, "flowRate", 164.0, 274.0),
    F::text(7, "hoursOfUse", 290.0, 274.0),
    F::text(7, "deliveryDevice", 398.0, 274.0),
    F::text(7, "emergencyContact", 147.0, 508.0).size(11.0),
    F::text(7, "emergencyPhone", 420.0, 508.0).size(11.0),
    F::text(7, "evacuationRelativeNameAndPhone", 137.0, 538.0).size(11.0),
    F::text(7, "hotelNameAndPhone", 164.0, 552.0).size(11.0),
    F::text(7, "shelterLocation", 111.0, 567.0).size(11.0),
    F::text(7, "otherDesctiption", 110.0, 596.0)
        .size(11.0)
        .from("otherDescription"),
    F::text(7, "priorityLevel", 121.0, 640.0).size(11.0),
    F::signature(7, "clinician", 27.0, 655.0).from("clinicianSignature"),
    F::date(7, "clinicianDate", 27.0, 699.0).size(11.0),
    // Page 9: medication profile header
    F::text(8, "patientName", 110.0, 135.0).size(11.0),
    F::text(8, "physicianName", 93.0, 148.0).size(11.0),
    F::text(8, "allergy", 78.0, 161.0).size(11.0),
    F::text(8, "DX", 61.0, 175.0).size(11.0),
    F::text(8, "pharmacyName", 389.0, 135.0).size(11.0),
    F::text(8, "address", 380.0, 148.0).size(11.0).from("pharmacyAddress"),
    F::text(8, "phoneNumber", 375.0, 161.0).size(11.0).from("pharmacyPhone"),
    F::text(8, "HT", 361.0, 175.0).size(11.0),
    F::text(8, "WT", 467.0, 175.0).size(11.0),
    // Page 10: vaccine questionnaire
    F::text(9, "patientName", 105.0, 124.0).size(11.0),
    F::date(9, "date", 408.0, 124.0).size(11.0).from("vaccineDate"),
    F::text(9, "fluOtherDesc", 101.0, 212.0).size(9.0),
    F::date(9, "fluVaccineDate", 455.0, 178.0).size(9.0),
    F::date(9, "pneumoniaVaccineDate", 474.0, 363.0).size(9.0),
    F::date(9, "vaccineAdminstrationDate", 413.0, 503.0).size(10.0),
    F::text(9, "vaccineSite", 61.0, 517.0).size(10.0),
    F::text(9, "vaccineManufacturer", 277.0, 517.0).size(10.0),
    F::date(9, "vaccineExpiryDate", 476.0, 517.0).size(10.0),
    F::date(9, "outcomeDate", 412.0, 592.0).size(10.0),
    F::text(9, "outcomeComment", 93.0, 633.0).size(10.0),
    F::signature(9, "patientSignatureFollowUp", 342.0, 527.0),
    F::signature(9, "nurseSignatureFollowUp", 65.0, 527.0),
    F::signature(9, "nurseSignature", 62.0, 659.0).from("vaccineNurseSignature"),
    F::signature(9, "patientSignature", 342.0, 665.0).from("vaccinePatientSignature"),
    // Page 11: pressure ulcer risk
    F::text(10, "patientName", 107.0, 31.0).size(11.0),
    F::date(10, "date", 59.0, 53.0).size(11.0).from("page11Date"),
    F::signature(10, "nurseSignature", 174.0, 700.0).from("pressureUlcerNurseSignature"),
    F::date(10, "nurseSignatureDate", 470.0, 726.0).size(11.0),
    // Page 12: beneficiary notice
    F::text(11, "homeHealthAgencyName", 332.0, 263.0).size(12.0),
    F::text(11, "homeHealthAgencyLocation", 74.0, 284.0).size(12.0),
    F::signature(11, "patientSignature", 107.0, 519.0).from("beneficiaryPatientSignature"),
    F::signature(11, "witnessSignature", 107.0, 600.0),
    F::date(11, "patientSignatureDate", 427.0, 540.0).size(11.0),
    F::date(11, "witnessSignatureDate", 427.0, 630.0).size(11.0),
    // Page 13: HMO notice
    F::signature(12, "patientSignature", 188.0, 590.0).from("hmoPatientSignature"),
    F::signature(12, "witnessSignature", 130.0, 610.0).from("hmoWitnessSignature"),
    F::date(12, "patientSignatureDate", 442.0, 612.0).size(11.0),
    F::date(12, "witnessSignatureDate", 442.0, 639.0).size(11.0),
    F::text(12, "patientName", 165.0, 665.0).size(11.0),
    // Page 14: Medicare secondary payer
    F::text(13, "insuranceCompanyName", 284.0, 576.0).size(11.0),
    F::text(13, "insuredName", 197.0, 594.0).size(11.0).from("patientName"),
    F::text(13, "policyNumber", 198.0, 612.0).size(11.0),
    F::text(13, "employerName", 172.0, 630.0).size(11.0),
    F::signature(13, "patientSignature", 195.0, 649.0).from("medicarePatientSignature"),
    F::date(13, "patientSignatureDate", 444.0, 676.0),
    F::text(13, "medicareNumber", 199.0, 704.0).size(13.0),
    F::date(13, "patientRetirementDate", 334.0, 558.0).size(9.0),
    F::date(13, "patientSpouseRetirementDate", 430.0, 558.0).size(9.0),
    F::circle(13, "option1Yes", 500.0, 240.0),
    F::circle(13, "option1No", 530.0, 240.0),
    F::circle(13, "option2Yes", 500.0, 290.0),
    F::circle(13, "option2No", 530.0, 290.0),
    F::circle(13, "option3Yes", 500.0, 328.0),
    F::circle(13, "option3No", 530.0, 328.0),
    F::circle(13, "option4Yes", 500.0, 362.0),
    F::circle(13, "option4No", 530.0, 362.0),
    F::circle(13, "option5Yes", 500.0, 381.0),
    F::circle(13, "option5No", 530.0, 381.0),
    F::circle(13, "option6Yes", 500.0, 433.0),
    F::circle(13, "option6No", 530.0, 433.0),
    F::circle(13, "option7Yes", 500.0, 464.0),
    F::circle(13, "option7No", 530.0, 464.0),
    F::circle(13, "option8Yes", 500.0, 501.0),
    F::circle(13, "option8No", 530.0, 501.0),
    F::circle(13, "option9Yes", 500.0, 535.0),
    F::circle(13, "option9No", 530.0, 535.0),
    // Page 15: advance directives
    F::text(14, "patientWish", 231.0, 342.0).size(11.0),
    F::text(14, "durablePowerAttorneyName", 150.0, 447.0),
    F::text(14, "durablePowerAttorneyTelphone", 402.0, 447.0),
    F::text(14, "durablePowerAttorneyPatientWish", 231.0, 501.0).size(11.0),
    F::signature(14, "patientSignature", 74.0, 600.0).from("advanceDirectivesPatientSignature"),
    F::signature(14, "witnessSignature", 314.0, 600.0).from("advanceDirectivesWitnessSignature"),
    F::date(14, "patientSignatureDate", 74.0, 662.0),
    F::date(14, "witnessSignatureDate", 315.0, 662.0),
    // Page 16: discharge notice
    F::text(15, "patientName", 148.0, 128.0).size(11.0),
    F::text(15, "patientNumber", 395.0, 128.0),
    F::date(15, "serviceEndDate", 268.0, 188.0),
    // Page 17: notice of non-coverage
    F::text(16, "planContactInfo", 234.0, 183.0),
    F::text(16, "additionalInfo", 74.0, 308.0),
    F::signature(16, "patientSignature", 109.0, 534.0).from("nonCoveragePatientSignature"),
    F::date(16, "patientSignatureDate", 417.0, 562.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldKind;

    #[test]
    fn daily_services_yes_appears_once() {
        let count = FIELDS
            .iter()
            .filter(|field| field.slot == "dailyServicesYes")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn every_coordinate_sits_inside_a_letter_page() {
        for field in FIELDS {
            assert!(field.coordinate.x < 612.0, "{} x out of page", field.slot);
            assert!(field.coordinate.y < 792.0, "{} y out of page", field.slot);
            assert!(field.page() < 18, "{} page out of template", field.slot);
        }
    }

    #[test]
    fn option_circles_come_in_pairs() {
        let circles: Vec<_> = FIELDS
            .iter()
            .filter(|field| field.kind() == FieldKind::Circle)
            .collect();
        assert_eq!(circles.len(), 18);
        for pair in circles.chunks(2) {
            assert_eq!(pair[0].coordinate.y, pair[1].coordinate.y);
            assert!(pair[0].slot.ends_with("Yes"));
            assert!(pair[1].slot.ends_with("No"));
        }
    }
}
