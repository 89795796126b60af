use modsdesc::primary::{count_nested_primary, count_primary};
use modsdesc::{map_str, MapperConfig, MappingError, WarningLog};
use serde_json::json;

const MODS_OPEN: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" xmlns:xlink="http://www.w3.org/1999/xlink" version="3.7">"#;

fn mods(body: &str) -> String {
    format!("{MODS_OPEN}{body}</mods>")
}

fn map_json(body: &str) -> (serde_json::Value, WarningLog) {
    let _ = env_logger::builder().is_test(true).try_init();
    let log = WarningLog::new();
    let description = map_str(&mods(body), &MapperConfig::default(), &log).unwrap();
    (serde_json::to_value(description).unwrap(), log)
}

#[test]
fn simple_title() {
    let (json, log) = map_json("<titleInfo><title>Two Cities</title></titleInfo>");
    assert_eq!(json, json!({"title": [{"value": "Two Cities"}]}));
    assert!(log.is_empty());
}

#[test]
fn parallel_title_has_no_group_type() {
    let (json, _) = map_json(
        r#"<titleInfo altRepGroup="1" type="translated"><title>Deux villes</title></titleInfo>
           <titleInfo altRepGroup="1" usage="primary"><title>Two Cities</title></titleInfo>"#,
    );
    assert_eq!(
        json["title"],
        json!([{
            "parallelValue": [
                {"value": "Deux villes", "type": "translated"},
                {"value": "Two Cities", "status": "primary"}
            ]
        }])
    );
}

#[test]
fn personal_name_with_relator_code() {
    let (json, log) = map_json(
        r#"<titleInfo><title>x</title></titleInfo>
           <name type="personal">
             <namePart>Dickens</namePart>
             <namePart>Charles</namePart>
             <role><roleTerm type="code" authority="marcrelator">aut</roleTerm></role>
           </name>"#,
    );
    assert_eq!(
        json["contributor"],
        json!([{
            "type": "person",
            "name": [{"structuredValue": [{"value": "Dickens"}, {"value": "Charles"}]}],
            "role": [{
                "code": "aut",
                "source": {"code": "marcrelator", "uri": "http://id.loc.gov/vocabulary/relators/"}
            }]
        }])
    );
    assert!(log.is_empty());
}

#[test]
fn single_geographic_subject() {
    let (json, _) = map_json(
        r#"<titleInfo><title>x</title></titleInfo>
           <subject><geographic authority="naf">Paris (France)</geographic></subject>"#,
    );
    assert_eq!(
        json["subject"],
        json!([{"value": "Paris (France)", "type": "place", "source": {"code": "naf"}}])
    );
}

#[test]
fn title_requiredness() {
    let log = WarningLog::new();
    let xml = mods("<note>no title here</note>");
    let result = map_str(&xml, &MapperConfig::default(), &log);
    assert!(matches!(result, Err(MappingError::MissingTitle)));

    let config = MapperConfig { require_title: false, ..MapperConfig::default() };
    let description = map_str(&xml, &config, &log).unwrap();
    let json = serde_json::to_value(description).unwrap();
    assert!(json.get("title").is_none());
    assert_eq!(json["note"], json!([{"value": "no title here"}]));
}

#[test]
fn role_code_without_authority_is_fatal() {
    let log = WarningLog::new();
    let xml = mods(
        r#"<titleInfo><title>x</title></titleInfo>
           <name><namePart>Smith</namePart><role><roleTerm type="code">Author1</roleTerm></role></name>"#,
    );
    let result = map_str(&xml, &MapperConfig::default(), &log);
    assert!(matches!(result, Err(MappingError::RoleMissingAuthority { code }) if code == "Author1"));
}

#[test]
fn at_most_one_primary_per_facet() {
    let (_, log) = map_json("<titleInfo><title>x</title></titleInfo>");
    assert!(log.is_empty());

    let log = WarningLog::new();
    let description = map_str(
        &mods(
            r#"<titleInfo usage="primary"><title>One</title></titleInfo>
               <titleInfo usage="primary"><title>Two</title></titleInfo>
               <name usage="primary"><namePart>A</namePart></name>
               <name usage="primary"><namePart>B</namePart></name>
               <name usage="primary" altRepGroup="2"><namePart>Чехов</namePart></name>
               <name usage="primary" altRepGroup="2"><namePart>Chekhov</namePart></name>
               <genre usage="primary">Fiction</genre>
               <genre usage="primary" altRepGroup="3">Novels</genre>
               <genre altRepGroup="3" lang="fre">Romans</genre>
               <language usage="primary"><languageTerm type="code" authority="iso639-2b">eng</languageTerm></language>
               <language usage="primary"><languageTerm type="code" authority="iso639-2b">fre</languageTerm></language>"#,
        ),
        &MapperConfig::default(),
        &log,
    )
    .unwrap();
    assert_eq!(count_nested_primary(&description.title), 1);
    assert!(description.title[0].is_primary());
    assert_eq!(count_nested_primary(&description.contributor), 1);
    assert_eq!(count_nested_primary(&description.form), 1);
    assert_eq!(count_primary(&description.language), 1);

    let facets: Vec<_> = log
        .into_warnings()
        .into_iter()
        .filter(|w| w.message == "Multiple marked as primary")
        .filter_map(|w| w.context_value("type").map(str::to_owned))
        .collect();
    assert_eq!(facets, vec!["title", "language", "contributor", "form"]);
}

#[test]
fn every_value_is_well_formed() {
    let log = WarningLog::new();
    let description = map_str(
        &mods(
            r#"<titleInfo><nonSort>The </nonSort><title>Cities</title><subTitle>a tale</subTitle></titleInfo>
               <titleInfo altRepGroup="a"><title>Paris</title></titleInfo>
               <titleInfo altRepGroup="a" type="translated"><title>Parigi</title></titleInfo>
               <name type="personal"><namePart type="family">Dickens</namePart><namePart type="given">Charles</namePart>
                 <displayForm>Dickens, Charles</displayForm>
                 <affiliation>Household Words</affiliation>
                 <description>Novelist</description>
                 <role><roleTerm type="code" authority="marcrelator">aut</roleTerm></role></name>
               <originInfo eventType="publication">
                 <dateIssued point="start" encoding="w3cdtf">1859</dateIssued>
                 <dateIssued point="end" encoding="w3cdtf">1860</dateIssued>
                 <place><placeTerm type="code" authority="marccountry">enk</placeTerm></place>
                 <publisher>Chapman and Hall</publisher>
                 <issuance>monographic</issuance>
               </originInfo>
               <subject authority="lcsh"><topic>London</topic><temporal>19th century</temporal></subject>
               <subject><hierarchicalGeographic><country>England</country><city>London</city></hierarchicalGeographic></subject>
               <physicalDescription><extent>1 v.</extent><note>Bound.</note></physicalDescription>
               <tableOfContents>One -- Two</tableOfContents>
               <identifier type="isbn">0141439602</identifier>
               <language><languageTerm type="code" authority="iso639-2b">eng</languageTerm>
                 <scriptTerm type="code" authority="iso15924">Latn</scriptTerm><scriptTerm type="text">Latin</scriptTerm></language>
               <recordInfo><recordContentSource authority="marcorg">CSt</recordContentSource>
                 <recordInfoNote type="admin">Reviewed</recordInfoNote>
                 <descriptionStandard authority="marcdescription">rda</descriptionStandard>
                 <languageOfCataloging><languageTerm type="code" authority="iso639-2b">eng</languageTerm>
                   <scriptTerm type="code" authority="iso15924">Latn</scriptTerm></languageOfCataloging></recordInfo>
               <relatedItem type="host"><titleInfo><title>Works</title></titleInfo></relatedItem>
               <location><url>https://purl.stanford.edu/bc123df4567</url><url note="mirror">https://example.org/x</url></location>
               <accessCondition type="useAndReproduction">Public domain.</accessCondition>"#,
        ),
        &MapperConfig::default(),
        &log,
    )
    .unwrap();
    let values = description.values();
    assert!(values.len() > 20);
    for value in &values {
        assert!(value.is_well_formed(), "malformed value: {value:?}");
    }
    for text in ["Novelist", "monographic", "Reviewed", "Latin", "Public domain."] {
        assert!(values.iter().any(|v| v.text() == Some(text)), "missing value: {text}");
    }
    assert!(values.iter().any(|v| v.code.as_deref() == Some("rda")));
}

#[test]
fn related_items_recurse() {
    let (json, _) = map_json(
        r#"<titleInfo><title>Issue 1</title></titleInfo>
           <relatedItem type="host" displayLabel="Journal">
             <titleInfo><title>The Journal</title></titleInfo>
             <relatedItem type="series"><titleInfo><title>Collected</title></titleInfo></relatedItem>
           </relatedItem>"#,
    );
    let related = &json["relatedResource"][0];
    assert_eq!(related["type"], json!("part of"));
    assert_eq!(related["displayLabel"], json!("Journal"));
    assert_eq!(related["title"], json!([{"value": "The Journal"}]));
    assert_eq!(related["relatedResource"][0]["type"], json!("in series"));
    assert_eq!(related["relatedResource"][0]["title"], json!([{"value": "Collected"}]));
}

#[test]
fn irregular_data_only_warns() {
    let (json, log) = map_json(
        r#"<titleInfo type="bogus"><title>x</title></titleInfo>
           <titleInfo><title> </title></titleInfo>
           <name type="personal"><namePart>Smith</namePart><role><roleTerm type="text"/></role></name>
           <identifier type="madeup">123</identifier>
           <relatedItem type="cousin"><titleInfo><title>y</title></titleInfo></relatedItem>"#,
    );
    assert_eq!(json["title"], json!([{"value": "x"}]));
    for message in [
        "Invalid title type",
        "Empty title node",
        "Contributor role code is missing",
        "Identifier has unrecognized type",
        "Invalid related resource type",
    ] {
        assert!(log.contains(message), "expected warning: {message}");
    }
}
