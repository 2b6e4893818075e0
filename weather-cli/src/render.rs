use weather_core::{
    WeatherPayload,
    present::{self, Icon, Theme, UvLabel},
};

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Storm => "⛈",
        Icon::Snow => "❄",
        Icon::Rain => "🌧",
        Icon::Fog => "🌫",
        Icon::Cloud | Icon::DefaultCloud => "☁",
        Icon::Sun => "☀",
    }
}

pub fn print_payload(payload: &WeatherPayload) {
    let location = &payload.location;
    let current = &payload.current;

    let description = current.primary_description();
    let icon = Icon::for_description(description);
    let theme = Theme::for_conditions(description, current.is_day());
    let uv = UvLabel::for_index(current.uv_index);

    println!("{} {}, {} ({})", glyph(icon), location.name, location.country, location.region);
    if let Some(local) = location.local_time() {
        println!("Local time: {}", local.format("%Y-%m-%d %H:%M"));
    }
    println!();
    println!(
        "{description}, {:.0}°C (feels like {:.0}°C)",
        current.temperature, current.feelslike
    );
    println!("Wind:       {} km/h {}", current.wind_speed, current.wind_dir);
    println!("Humidity:   {}% ({})", current.humidity, present::humidity_comment(current.humidity));
    println!("UV index:   {} ({}, {})", current.uv_index, uv.label(), uv.color());
    println!(
        "Visibility: {} km ({})",
        current.visibility,
        present::visibility_comment(current.visibility)
    );
    println!(
        "Pressure:   {} hPa ({})",
        current.pressure,
        present::pressure_comment(current.pressure)
    );
    println!("Cloudcover: {}%", current.cloudcover);
    println!("Theme:      {}", theme.as_str());
}
