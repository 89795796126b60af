//! Static vocabularies and lookup tables shared by the builders and the normalizer

use phf::{phf_map, phf_set};

pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const GML_NS: &str = "http://www.opengis.net/gml/3.2/";

// MODS version and schema location written by the reverse mapper
pub const MODS_VERSION: &str = "3.7";
pub const MODS_SCHEMA_LOCATION: &str =
  "http://www.loc.gov/mods/v3 http://www.loc.gov/standards/mods/v3/mods-3-7.xsd";

pub const MARC_RELATOR_CODE: &str = "marcrelator";
pub const MARC_RELATOR_URI: &str = "http://id.loc.gov/vocabulary/relators/";

pub const PRIMARY_DISPLAY: &str = "primary display";

/// Authority URIs which are canonical only with a trailing slash.
pub const AUTHORITY_URIS: phf::Set<&'static str> = phf_set! {
  "http://id.loc.gov/authorities/names",
  "http://id.loc.gov/authorities/subjects",
  "http://id.loc.gov/authorities/genreForms",
  "http://id.loc.gov/authorities/childrensSubjects",
  "http://id.loc.gov/authorities/demographicTerms",
  "http://id.loc.gov/authorities/performanceMediums",
  "http://id.loc.gov/vocabulary/relators",
  "http://id.loc.gov/vocabulary/languages",
  "http://id.loc.gov/vocabulary/iso639-2",
  "http://id.loc.gov/vocabulary/countries",
  "http://id.loc.gov/vocabulary/geographicAreas",
  "http://id.loc.gov/vocabulary/graphicMaterials",
  "http://id.loc.gov/vocabulary/organizations",
  "http://id.loc.gov/vocabulary/resourceTypes",
  "http://id.loc.gov/vocabulary/descriptionConventions",
  "http://id.loc.gov/vocabulary/carriers",
  "http://id.loc.gov/vocabulary/mediaTypes",
  "http://id.loc.gov/vocabulary/contentTypes",
  "http://id.loc.gov/vocabulary/issuance",
  "http://id.loc.gov/vocabulary/frequencies",
  "http://id.worldcat.org/fast",
  "http://viaf.org/viaf",
  "http://vocab.getty.edu/aat",
  "http://vocab.getty.edu/tgn",
  "http://vocab.getty.edu/ulan",
  "http://www.wikidata.org/entity",
  "https://www.wikidata.org/wiki",
  "http://sws.geonames.org",
  "http://rdaregistry.info/termList/RDAContentType",
  "http://rdaregistry.info/termList/RDAMediaType",
  "http://rdaregistry.info/termList/RDACarrierType",
};

/// Authority codes which are known to be mis-coded in legacy records.
pub const CODE_CORRECTIONS: phf::Map<&'static str, &'static str> = phf_map! {
  "lcnaf" => "naf",
  "tgm" => "lctgm",
};

pub const NAME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "personal" => "person",
  "corporate" => "organization",
  "family" => "family",
  "conference" => "conference",
};

pub const NAME_PART_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "family" => "surname",
  "given" => "forename",
  "termsOfAddress" => "term of address",
  "date" => "life dates",
};

pub const TITLE_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "abbreviated" => "abbreviated",
  "translated" => "translated",
  "alternative" => "alternative",
  "uniform" => "uniform",
};

pub const TITLE_PART_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "nonSort" => "nonsorting characters",
  "title" => "main title",
  "subTitle" => "subtitle",
  "partName" => "part name",
  "partNumber" => "part number",
};

/// Subject children which map onto a plain typed value.
pub const SUBJECT_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "topic" => "topic",
  "geographic" => "place",
  "temporal" => "time",
  "genre" => "genre",
  "occupation" => "occupation",
};

pub const HIERARCHICAL_GEOGRAPHIC_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "continent" => "continent",
  "country" => "country",
  "region" => "region",
  "province" => "province",
  "state" => "state",
  "territory" => "territory",
  "county" => "county",
  "city" => "city",
  "citySection" => "city section",
  "island" => "island",
  "area" => "area",
  "extraterrestrialArea" => "extraterrestrial area",
};

/// Date elements of `originInfo` in event precedence order.
pub const EVENT_DATE_KINDS: [(&str, &str); 5] = [
  ("dateCreated", "creation"),
  ("dateIssued", "publication"),
  ("copyrightDate", "copyright"),
  ("dateCaptured", "capture"),
  ("dateOther", "other"),
];

/// `originInfo` children in the order used to infer a missing `eventType`.
pub const EVENT_TYPE_INFERENCE: [(&str, &str); 8] = [
  ("dateIssued", "publication"),
  ("publisher", "publication"),
  ("dateCreated", "production"),
  ("copyrightDate", "copyright notice"),
  ("dateCaptured", "capture"),
  ("edition", "publication"),
  ("issuance", "publication"),
  ("frequency", "publication"),
];

/// Identifier types keyed by their lower-cased MODS spelling.
pub const IDENTIFIER_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "ark" => "ARK",
  "doi" => "DOI",
  "handle" => "Handle",
  "hdl" => "Handle",
  "isbn" => "ISBN",
  "isni" => "ISNI",
  "ismn" => "ISMN",
  "isrc" => "ISRC",
  "issn" => "ISSN",
  "issn-l" => "ISSN-L",
  "istc" => "ISTC",
  "lccn" => "LCCN",
  "local" => "local",
  "matrix number" => "matrix number",
  "music plate" => "music plate",
  "music publisher" => "music publisher",
  "oclc" => "OCLC",
  "orcid" => "ORCID",
  "sici" => "SICI",
  "stock number" => "stock number",
  "sudoc" => "SuDoc",
  "upc" => "UPC",
  "uri" => "URI",
  "url" => "URL",
  "urn" => "URN",
  "videorecording identifier" => "videorecording identifier",
  "viaf" => "VIAF",
  "wikidata" => "Wikidata",
};

pub const RELATED_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "preceding" => "preceded by",
  "succeeding" => "succeeded by",
  "original" => "has original version",
  "host" => "part of",
  "constituent" => "has part",
  "series" => "in series",
  "otherVersion" => "has version",
  "otherFormat" => "has other format",
  "isReferencedBy" => "referenced by",
  "references" => "references",
  "reviewOf" => "reviewed by",
};

pub const ACCESS_CONDITION_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
  "restriction on access" => "access restriction",
  "restrictionOnAccess" => "access restriction",
  "use and reproduction" => "use and reproduction",
  "useAndReproduction" => "use and reproduction",
  "license" => "license",
};

/// `physicalDescription` children: element name to (type, source value).
pub const PHYSICAL_DESCRIPTION_TYPES: phf::Map<&'static str, (&'static str, Option<&'static str>)> = phf_map! {
  "form" => ("form", None),
  "extent" => ("extent", None),
  "digitalOrigin" => ("digital origin", Some("MODS digital origin terms")),
  "reformattingQuality" => ("reformatting quality", Some("MODS reformatting quality terms")),
  "internetMediaType" => ("media type", Some("IANA media types")),
};

pub const RESOURCE_TYPES_SOURCE: &str = "MODS resource types";
pub const ISSUANCE_SOURCE: &str = "MODS issuance terms";
pub const MEDIA_TYPES_SOURCE: &str = "IANA media types";

pub const ISO_639_2B: &str = "iso639-2b";
pub const ISO_15924: &str = "iso15924";
