//! Dashboard flows against SQLite: payment summary, request review, slots
//! and users.

mod common;

use rust_decimal::Decimal;
use studio::{
    NewClientUser, NewRequest, NewSlot, PaymentStatus, RecordKind, RequestStatus, SlotKind,
};

#[tokio::test]
async fn test_payment_summary_over_bookings_and_rentals() {
    let studio = common::studio().await;

    studio
        .submit_request(
            NewRequest::new(RecordKind::Booking)
                .email("a@x.com")
                .price(Decimal::from(100))
                .payment(PaymentStatus::Paid),
        )
        .await
        .unwrap();
    studio
        .submit_request(
            NewRequest::new(RecordKind::Booking)
                .email("b@x.com")
                .price(Decimal::from(50)),
        )
        .await
        .unwrap();
    studio
        .submit_request(
            NewRequest::new(RecordKind::Rental)
                .email("a@x.com")
                .price(Decimal::new(2550, 2))
                .payment(PaymentStatus::Paid),
        )
        .await
        .unwrap();

    let summary = studio.payment_summary().await.unwrap();
    assert_eq!(summary.total_paid, Decimal::new(12550, 2));
    assert_eq!(summary.total_pending, Decimal::from(50));
    assert_eq!(summary.distinct_client_count, 2);
    assert_eq!(summary.paid_count, 2);
    assert_eq!(summary.paid_vs_unpaid.series(), [("Paid", 2), ("Unpaid", 1)]);
}

#[tokio::test]
async fn test_empty_store_summary_is_zero() {
    let studio = common::studio().await;
    let summary = studio.payment_summary().await.unwrap();

    assert_eq!(summary.total_paid, Decimal::ZERO);
    assert_eq!(summary.total_pending, Decimal::ZERO);
    assert_eq!(summary.distinct_client_count, 0);
    assert_eq!(summary.paid_vs_unpaid.total(), 0);
}

#[tokio::test]
async fn test_request_review() {
    let studio = common::studio().await;
    let booking = studio
        .submit_request(NewRequest::new(RecordKind::Booking).email("a@x.com"))
        .await
        .unwrap();
    let rental = studio
        .submit_request(NewRequest::new(RecordKind::Rental).email("b@x.com"))
        .await
        .unwrap();

    let pending = studio.requests(RequestStatus::Pending).await.unwrap();
    assert_eq!(pending, vec![booking.clone(), rental.clone()]);

    studio
        .confirm_request(RecordKind::Booking, booking.id)
        .await
        .unwrap();
    studio
        .decline_request(RecordKind::Rental, rental.id)
        .await
        .unwrap();

    assert!(studio.requests(RequestStatus::Pending).await.unwrap().is_empty());
    let confirmed = studio.requests(RequestStatus::Confirmed).await.unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].email.as_deref(), Some("a@x.com"));

    studio
        .delete_request(RecordKind::Rental, rental.id)
        .await
        .unwrap();
    assert!(
        studio
            .requests(RequestStatus::Declined)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        studio
            .delete_request(RecordKind::Rental, None)
            .await
            .unwrap_err()
            .is_validation_error()
    );
}

#[tokio::test]
async fn test_schedule_slots() {
    let studio = common::studio().await;
    let slot = studio
        .add_slot(
            SlotKind::PrivateClass,
            &NewSlot {
                class_date: "2025-08-01 10:00".to_string(),
                style: Some("Tango".to_string()),
                level: Some("Advanced".to_string()),
                duration: "45 min".to_string(),
                price: "80".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(slot.price, Decimal::from(80));

    let missing_level = NewSlot {
        level: Some(" ".to_string()),
        ..NewSlot {
            class_date: "2025-08-02".to_string(),
            style: Some("Tango".to_string()),
            level: None,
            duration: "45 min".to_string(),
            price: "80".to_string(),
        }
    };
    assert!(
        studio
            .add_slot(SlotKind::PrivateClass, &missing_level)
            .await
            .unwrap_err()
            .is_validation_error()
    );

    assert_eq!(
        studio.available_slots(SlotKind::PrivateClass).await.unwrap(),
        vec![slot.clone()]
    );
    studio
        .book_slot(SlotKind::PrivateClass, Some(slot.id))
        .await
        .unwrap();
    assert!(
        studio
            .available_slots(SlotKind::PrivateClass)
            .await
            .unwrap()
            .is_empty()
    );
    studio
        .delete_slot(SlotKind::PrivateClass, Some(slot.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_users() {
    let studio = common::studio().await;
    let user = studio
        .create_user(NewClientUser {
            email: Some("client@studio.test".to_string()),
            name: Some("Client".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(studio.users().await.unwrap(), vec![user.clone()]);
    studio.delete_user(&user.id).await.unwrap();
    assert!(studio.users().await.unwrap().is_empty());
    assert!(studio.delete_user(&user.id).await.unwrap_err().is_not_found());
}
