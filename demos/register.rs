use tokio::sync::mpsc;

use cs2_cup::{
    Field, FormConfig, FormVariant, RegistrationError, RegistrationForm, RegistrationType,
    Notification, Tournament, TracingSink,
};

#[tokio::main]
async fn main() -> cs2_cup::Result<()> {
    let tournament = Tournament::cs2_2025();
    println!(
        "{} | {} - {} | prize pool {} RUB",
        tournament.title,
        tournament.main_event.start,
        tournament.main_event.end,
        tournament.prize_pool
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let config = FormConfig::from_json(r#"{ "variant": "dual", "submitDelayMs": 300 }"#)?;
    let form = RegistrationForm::new(config, tx);

    form.set_registration_type(RegistrationType::Team)?;
    form.set_field(Field::PlayerName, "Cap")?;
    match form.submit().await {
        Err(RegistrationError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                println!("{}: {message}", form.label(field));
            }
        }
        other => println!("unexpected: {other:?}"),
    }

    form.set_field(Field::TeamName, "Mongolz")?;
    form.set_field(Field::Email, "captain@example.com")?;
    form.set_field(Field::Phone, "+7 900 123-45-67")?;
    form.set_field(Field::SteamId, "STEAM_0:1:4242")?;
    form.set_field(Field::TeamSize, "5")?;
    form.set_field(Field::Experience, "advanced")?;
    form.submit().await?;

    while let Ok(notification) = rx.try_recv() {
        println!("{}\n{}", notification.title, notification.description);
    }

    let team_only = RegistrationForm::new(FormConfig::new(FormVariant::TeamOnly), TracingSink);
    let sizes: Vec<_> = team_only
        .team_size_options()
        .iter()
        .map(|option| option.value)
        .collect();
    println!("team-only sizes: {sizes:?}");
    Ok(())
}
