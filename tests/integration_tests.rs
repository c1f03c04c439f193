//! Integration tests against an in-process fake Docmail service
//!
//! Tests the full end-to-end flow: YAML config → client operations → SOAP
//! arguments → XML responses → decoded records and domain types

use async_trait::async_trait;
use docmail::decode::ERROR_CODE_FIELD;
use docmail::{
    load_config_from_str, ClientConfig, DecodedRecord, DocmailClient, Error, FieldValue, Mailing,
    MailingListFile, MailingListOptions, ProcessOptions, ResponseDecoder, Result, SoapArg,
    SoapService, TemplateFile,
};
use std::collections::HashMap;
use std::sync::Mutex;

const MAILING_GUID: &str = "0c7f1e52-4b1a-4e2d-9a7b-5d3c2e1f0a9b";

// ============================================================================
// Fake Service
// ============================================================================

/// Minimal stateful stand-in for the remote service
#[derive(Default)]
struct FakeDocmail {
    mailings: Mutex<HashMap<String, HashMap<&'static str, String>>>,
}

fn field(label: &str, value: &str) -> String {
    format!("<Field><Key>{label}</Key><Value>{value}</Value></Field>")
}

fn result(fields: &[String]) -> String {
    format!("<Result>{}</Result>", fields.concat())
}

fn fault(code: &str, error: &str, description: &str) -> String {
    format!(
        "<Result><Field><Key>Error code</Key><Value>{code}</Value>\
         <Key>Error code string</Key><Value>{error}</Value>\
         <Key>Error message</Key><Value>{description}</Value></Field></Result>"
    )
}

fn arg(args: &[SoapArg], index: usize) -> String {
    args.get(index).map(ToString::to_string).unwrap_or_default()
}

#[async_trait]
impl SoapService for FakeDocmail {
    async fn invoke(&self, method: &str, args: &[SoapArg]) -> Result<String> {
        if arg(args, 1) != "s3cret" {
            return Ok(fault("1", "Authentication", "Invalid username or password"));
        }

        let mut mailings = self.mailings.lock().unwrap();
        let guid = arg(args, 2);

        let xml = match method {
            "CreateMailing" => {
                let mut mailing = HashMap::new();
                mailing.insert("name", arg(args, 4));
                mailing.insert("status", "Mailing Creation".to_string());
                mailings.insert(MAILING_GUID.to_string(), mailing);
                result(&[field("MailingGUID", MAILING_GUID)])
            }
            "GetMailingDetails" => match mailings.get(&guid) {
                Some(mailing) => result(&[
                    field("Mailing name", &mailing["name"]),
                    field("Is Mono", "No"),
                    field("Is Duplex", "Yes"),
                    field("Despatch Date", "ASAP"),
                    field(
                        "MailingListGUID",
                        mailing
                            .get("list")
                            .map_or("00000000-0000-0000-0000-000000000000", String::as_str),
                    ),
                    field("Last Status Change", "03/02/2025 16:45:10"),
                ]),
                None => fault("17", "InvalidMailing", "Mailing not found"),
            },
            "AddTemplateFile" => result(&[field("TemplateGUID", "tmpl-0001")]),
            "AddMailingListFile" => {
                if let Some(mailing) = mailings.get_mut(&guid) {
                    mailing.insert("list", "list-0001".to_string());
                }
                result(&[field("MailingListGUID", "list-0001")])
            }
            "ProcessMailing" => {
                if let Some(mailing) = mailings.get_mut(&guid) {
                    mailing.insert("status", "Processing".to_string());
                }
                result(&[field("Success", "Yes")])
            }
            "GetStatus" => match mailings.get(&guid) {
                Some(mailing) => result(&[field("Status", &mailing["status"])]),
                None => fault("17", "InvalidMailing", "Mailing not found"),
            },
            "GetBalance" if guid == "Topup" => result(&[field("Current balance", "87.25")]),
            "GetBalance" => result(&[field("Current balance", "0")]),
            _ => fault("99", "UnknownMethod", method),
        };
        Ok(xml)
    }
}

fn client(password: &str) -> DocmailClient<FakeDocmail> {
    let yaml = format!("username: acme\npassword: {password}\nsource: integration\n");
    let config = load_config_from_str(&yaml).unwrap();
    DocmailClient::new(config, FakeDocmail::default()).unwrap()
}

// ============================================================================
// End-to-End Flow
// ============================================================================

#[tokio::test]
async fn test_full_mailing_flow() {
    let client = client("s3cret");

    let mut mailing = Mailing::named("Spring campaign");
    let guid = client.create_mailing(&mut mailing).await.unwrap();
    assert_eq!(guid, MAILING_GUID);

    let mut template = TemplateFile::from_bytes("letter.docx", b"letter".to_vec()).unwrap();
    let template_guid = client.add_template_file(&guid, &mut template).await.unwrap();
    assert_eq!(template_guid, "tmpl-0001");

    let mut list = MailingListFile::from_bytes(
        "recipients.csv",
        b"name,address\n".to_vec(),
        MailingListOptions::new(),
    )
    .unwrap();
    client.add_mailing_list_file(&guid, &mut list).await.unwrap();
    assert_eq!(list.guid.as_deref(), Some("list-0001"));

    let details = client.get_mailing(&guid).await.unwrap();
    assert_eq!(details.name.as_deref(), Some("Spring campaign"));
    assert!(details.is_colour);
    assert!(details.is_duplex);
    assert!(details.despatch_asap);
    assert_eq!(details.despatch_date, None);
    assert_eq!(details.mailing_list_guid.as_deref(), Some("list-0001"));
    assert!(details
        .details
        .get_timestamp("last_status_change")
        .is_some());

    let submitted = client
        .process_mailing(&guid, &ProcessOptions::new().submit(true))
        .await
        .unwrap();
    assert!(submitted);
    assert_eq!(client.get_process_status(&guid).await.unwrap(), "Processing");
}

#[tokio::test]
async fn test_unlisted_mailing_has_no_list_guid() {
    let client = client("s3cret");

    let mut mailing = Mailing::named("No list yet");
    let guid = client.create_mailing(&mut mailing).await.unwrap();

    let details = client.get_mailing(&guid).await.unwrap();
    assert_eq!(details.mailing_list_guid, None);
    assert_eq!(
        details.details.get("mailing_list_guid"),
        Some(&FieldValue::Null)
    );
}

#[tokio::test]
async fn test_balances() {
    let client = client("s3cret");

    assert!((client.get_topup_balance().await.unwrap() - 87.25).abs() < f64::EPSILON);
    assert!(client.get_invoice_balance().await.unwrap().abs() < f64::EPSILON);
}

// ============================================================================
// Faults
// ============================================================================

#[tokio::test]
async fn test_bad_credentials_fault() {
    let client = client("wrong");

    let err = client.get_topup_balance().await.unwrap_err();
    match err {
        Error::Fault(fault) => {
            assert_eq!(fault.code(), "1");
            assert_eq!(fault.error(), "Authentication");
            assert_eq!(fault.description(), "Invalid username or password");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_mailing_fault() {
    let client = client("s3cret");

    let err = client.get_process_status("missing").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Docmail fault: InvalidMailing (17): Mailing not found"
    );
}

#[tokio::test]
async fn test_unsupported_operation_fault() {
    let client = client("s3cret");

    let err = client.delete_mail_pack(MAILING_GUID).await.unwrap_err();
    assert_eq!(err.as_fault().unwrap().description(), "DeleteMailPack");
}

// ============================================================================
// Decoder Without a Client
// ============================================================================

#[test]
fn test_decode_saved_response() {
    let xml = r"<?xml version='1.0' encoding='utf-8'?>
<Result>
  <Field><Key>MailingGUID</Key><Value>abc</Value></Field>
  <Field><Key>HTTPPostOnSuccess</Key><Value>No</Value></Field>
  <Field><Key>Despatch Date</Key><Value>14/02/2025 09:30:00</Value></Field>
  <Field><Key>PO Reference</Key><Value>PO-9</Value></Field>
</Result>";

    let record: DecodedRecord = ResponseDecoder::new().decode(xml).unwrap();
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(
        keys,
        vec!["mailing_guid", "http_post_on_success", "despatch_date", "po_reference"]
    );
    assert_eq!(record.get_bool("http_post_on_success"), Some(false));
    assert_eq!(
        record.get("despatch_date").unwrap().to_string(),
        "2025-02-14 09:30:00"
    );
    assert!(!record.contains_key(ERROR_CODE_FIELD));
}

#[test]
fn test_config_is_shared_between_clients() {
    let config = ClientConfig::builder("acme", "s3cret").build().unwrap();
    let first = DocmailClient::new(config.clone(), FakeDocmail::default()).unwrap();
    let second = DocmailClient::new(config, FakeDocmail::default()).unwrap();
    assert_eq!(first.config(), second.config());
}
