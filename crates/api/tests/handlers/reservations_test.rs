use axum::http::{header, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use courtside_api::handlers::{reservations::decode_payment_proof, support::attachment};
use courtside_core::{errors::CourtError, models::reservation::PaymentProofUpload};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn upload(file_name: &str, content_type: &str, data_base64: &str) -> PaymentProofUpload {
    PaymentProofUpload {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        data_base64: data_base64.to_string(),
    }
}

#[rstest]
#[case("transferencia.png", "image/png", "image/png")]
#[case("foto.jpg", " IMAGE/JPEG ", "image/jpeg")]
#[case("comprobante.pdf", "application/pdf", "application/pdf")]
#[case("comprobante.PDF", "application/octet-stream", "application/pdf")]
#[case("captura.png", "image/png\u{1}", "image/png")]
fn test_accepts_images_and_pdfs(
    #[case] file_name: &str,
    #[case] content_type: &str,
    #[case] stored_type: &str,
) {
    let encoded = STANDARD.encode(b"%PDF-1.4 fake");

    let proof = decode_payment_proof(&upload(file_name, content_type, &encoded)).unwrap();

    assert_eq!(proof.data, b"%PDF-1.4 fake".to_vec());
    assert_eq!(proof.file_name, file_name);
    assert_eq!(proof.content_type, stored_type);
}

#[rstest]
#[case("virus.exe", "application/x-msdownload")]
#[case("dibujo.svg", "image/svg+xml")]
#[case("pago", "image/png\u{1}")]
fn test_rejects_other_file_types(#[case] file_name: &str, #[case] content_type: &str) {
    let encoded = STANDARD.encode(b"MZ");

    let result = decode_payment_proof(&upload(file_name, content_type, &encoded));

    assert!(matches!(result, Err(CourtError::Validation(_))));
}

#[rstest]
#[case("not base64 at all!")]
#[case("")]
fn test_rejects_bad_or_empty_payload(#[case] data: &str) {
    let result = decode_payment_proof(&upload("pago.jpg", "image/jpeg", data));

    assert!(matches!(result, Err(CourtError::Validation(_))));
}

#[test]
fn test_attachment_strips_control_characters_from_file_name() {
    let response = attachment("application/pdf", "pago\r\n\"mayo\"\u{7}.pdf", b"%PDF".to_vec());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"pago___mayo__.pdf\""
    );
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
}
