//! Console summaries printed at the end of a run.

use wsn_network::{EnergyForecast, NetworkState};
use wsn_sensor::{MqttMessage, Sensor};
use wsn_security::TrafficMessage;

pub fn print_network(network: &NetworkState) {
    println!("── Network ─────────────────────────────────────────");
    println!(
        "nodes {:>4}  active {:>4}  heads {:>3} (active {:>3})",
        network.len(),
        network.active_count(),
        network.cluster_heads().count(),
        network.active_head_count(),
    );
    println!(
        "messages {:>8}  energy {:>10.2}  mean battery {:>6.2}%",
        network.messages_transmitted,
        network.total_energy_consumed,
        network.mean_active_battery(),
    );

    let mut sizes: Vec<_> = network.cluster_sizes().into_iter().collect();
    sizes.sort();
    for (head, size) in sizes {
        let battery = network.node(head).map_or(0.0, |n| n.battery);
        println!("  cluster {head}: {size:>3} members, head battery {battery:>6.2}%");
    }
    for head in network.headless_clusters() {
        println!("  cluster {head}: headless");
    }
}

pub fn print_forecast(forecast: &EnergyForecast) {
    println!("── Energy forecast ─────────────────────────────────");
    println!(
        "heads   {:>3}  battery {:>6.2}%  rate {:>5.2}  -> {:?}",
        forecast.head_count,
        forecast.avg_head_battery,
        forecast.avg_head_rate,
        forecast.projected_head_battery,
    );
    println!(
        "regular {:>3}  battery {:>6.2}%  rate {:>5.2}  -> {:?}",
        forecast.regular_count,
        forecast.avg_regular_battery,
        forecast.avg_regular_rate,
        forecast.projected_regular_battery,
    );
}

pub fn print_sensors(sensors: &[Sensor]) {
    println!("── Sensors ─────────────────────────────────────────");
    for s in sensors {
        println!(
            "  {:<12} {:<12} {:>10} {:>6.1}% {}",
            s.location,
            s.kind,
            s.value.to_string(),
            s.battery,
            if s.active { "" } else { "(inactive)" },
        );
    }
}

pub fn print_mqtt(messages: &[MqttMessage]) {
    println!("── MQTT ────────────────────────────────────────────");
    for m in messages {
        println!("  {} {}", m.topic, m.payload);
    }
}

pub fn print_traffic(messages: &[TrafficMessage]) {
    println!("── Traffic ─────────────────────────────────────────");
    for m in messages {
        println!(
            "  {} {:<11} {:<15} -> {:<15} {}",
            m.timestamp.format("%H:%M:%S"),
            m.kind,
            m.source,
            m.destination,
            m.message,
        );
    }
}
