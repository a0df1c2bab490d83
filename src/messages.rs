// Localized UI strings

use crate::locale::Locale;

pub fn weather_heading(locale: Locale) -> &'static str {
    locale.pick("Phú Quốc Weather", "Thời tiết Phú Quốc")
}

pub fn humidity(locale: Locale) -> &'static str {
    locale.pick("Humidity", "Độ ẩm")
}

pub fn remove(locale: Locale) -> &'static str {
    locale.pick("Remove", "Xóa")
}

pub fn itinerary_header(locale: Locale) -> &'static str {
    locale.pick("My Phú Quốc Itinerary:", "Hành trình Phú Quốc của tôi:")
}

pub fn missing_date(locale: Locale) -> &'static str {
    locale.pick("Please select a date!", "Vui lòng chọn ngày!")
}

pub fn invalid_share_link(locale: Locale) -> &'static str {
    locale.pick(
        "Sharing is unavailable right now.",
        "Hiện không thể chia sẻ hành trình.",
    )
}

pub fn date_unavailable(locale: Locale, tour: &str, date: &str) -> String {
    match locale {
        Locale::En => format!("Sorry, {} is not available on {}.", tour, date),
        Locale::Vi => format!("Xin lỗi, {} không có sẵn vào ngày {}.", tour, date),
    }
}

pub fn invalid_guest_count(locale: Locale, raw: &str) -> String {
    match locale {
        Locale::En => format!("Number of guests must be at least 1 (got '{}').", raw),
        Locale::Vi => format!("Số khách phải ít nhất là 1 (nhận được '{}').", raw),
    }
}

pub fn malformed_selection(locale: Locale) -> &'static str {
    locale.pick("Please choose a tour.", "Vui lòng chọn một tour.")
}

pub fn booking_failed(locale: Locale) -> &'static str {
    locale.pick(
        "Your booking could not be saved. Please try again.",
        "Không thể lưu đặt chỗ của bạn. Vui lòng thử lại.",
    )
}

pub fn booking_summary(
    locale: Locale,
    tour: &str,
    date: &str,
    guests: u32,
    total: &str,
) -> String {
    match locale {
        Locale::En => format!(
            "Booked: {} on {} for {} guest(s). Total: {}",
            tour, date, guests, total
        ),
        Locale::Vi => format!(
            "Đã đặt: {} vào {} cho {} khách. Tổng: {}",
            tour, date, guests, total
        ),
    }
}

pub fn booking_confirmed_title(locale: Locale) -> &'static str {
    locale.pick("Booking Confirmed!", "Đặt chỗ thành công!")
}

pub fn booking_confirmed_body(
    locale: Locale,
    tour: &str,
    date: &str,
    guests: u32,
    total: &str,
) -> String {
    match locale {
        Locale::En => format!(
            "Your {} for {} guest(s) on {} is confirmed. Total: {}",
            tour, guests, date, total
        ),
        Locale::Vi => format!(
            "Tour {} cho {} khách vào ngày {} đã được xác nhận. Tổng: {}",
            tour, guests, date, total
        ),
    }
}

pub fn empty_experience(locale: Locale) -> &'static str {
    locale.pick(
        "Please write something about your trip.",
        "Vui lòng viết đôi điều về chuyến đi của bạn.",
    )
}

pub fn experience_author() -> &'static str {
    "User"
}

pub fn chat_you(locale: Locale) -> &'static str {
    locale.pick("You", "Bạn")
}

pub fn chat_support(locale: Locale) -> &'static str {
    locale.pick("Support", "Hỗ trợ")
}

pub fn chat_reply(locale: Locale) -> &'static str {
    locale.pick(
        "How can I assist you today?",
        "Tôi có thể giúp gì cho bạn hôm nay?",
    )
}

pub fn chat_reply_title(locale: Locale) -> &'static str {
    locale.pick("New Chat Response", "Phản hồi chat mới")
}

// Static page labels that swap with the language selector
pub fn section_title(locale: Locale, section: PageSection) -> &'static str {
    match section {
        PageSection::Destinations => locale.pick("Destinations", "Điểm đến"),
        PageSection::Cuisine => locale.pick("Local Cuisine", "Ẩm thực địa phương"),
        PageSection::Booking => locale.pick("Book a Tour", "Đặt tour"),
        PageSection::Itinerary => locale.pick("Itinerary Planner", "Lập kế hoạch hành trình"),
        PageSection::Weather => locale.pick("Weather", "Thời tiết"),
        PageSection::Experiences => locale.pick("Traveller Experiences", "Trải nghiệm du khách"),
        PageSection::Map => locale.pick("Map", "Bản đồ"),
        PageSection::Chat => locale.pick("Chat with us", "Trò chuyện với chúng tôi"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSection {
    Destinations,
    Cuisine,
    Booking,
    Itinerary,
    Weather,
    Experiences,
    Map,
    Chat,
}
