//! User-facing texts (HTML parse mode)

use crate::notification;
use crate::state_machine::BookingForm;

pub const SPACE_URL: &str = "https://dushepolezno.ru/prostranstvo";
pub const SCHEDULE_URL: &str = "https://dushepolezno.ru/prostranstvo-zapis";
pub const TERMS_URL: &str = "https://yadi.sk/i/vYDfeS16TEy9aQ";
/// Human contact for anything the bot cannot handle
pub const FALLBACK_CONTACT: &str = "@dushepolezno_work";

pub fn welcome() -> String {
    format!(
        "Привет! Я бот для аренды Пространства. Мы открыты с 9 до 22 и работаем без выходных. \
         Подробнее узнай <a href=\"{SPACE_URL}\">тут</a>. Перед началом бронирования обязательно \
         посмотри свободные слоты в <a href=\"{SCHEDULE_URL}\">расписании</a>. Если всё понятно, \
         нажми «Забронировать» или введи /book. Подробнее о кабинетах: /info"
    )
}

pub fn info() -> String {
    format!(
        "В нашем пространстве есть два помещения разного размера: Кабинет 13 м² и Зал 17 м². \
         Кабинет подходит для проведения консультаций, в том числе групповых по 5-6 человек, \
         для занятий с репетитором и для съёмок фото или видео. Зал предназначен для лекций, \
         выставок, творческих мастер-классов, коворкинга, использования пространства как \
         мастерской или консультативного пространства, зал вмещает примерно 10-15 человек. \
         Подробнее <a href=\"{SPACE_URL}\">тут</a>. Перед началом бронирования обязательно \
         посмотри свободные слоты в <a href=\"{SCHEDULE_URL}\">расписании</a>. Если всё понятно, \
         вводи /book и мы начнём процесс бронирования"
    )
}

pub fn booking_intro() -> String {
    format!(
        "Вы начали процесс бронирования кабинетов! Посмотреть актуальное расписание можно на \
         нашем сайте <a href=\"{SCHEDULE_URL}\">ссылка</a>. Сейчас я задам вам несколько \
         вопросов о вашем мероприятии, чтобы передать эту информацию менеджеру. Для начала, \
         введите ваше имя."
    )
}

pub const ASK_NAME_AGAIN: &str = "Пожалуйста, введите ваше имя.";

pub const ASK_CONTACT: &str = "Спасибо! Теперь, пожалуйста, введите ваш email в формате \
     qwerty@yandex.com и телефон в формате +7(900)1234567.";

pub const ASK_PURPOSE: &str =
    "Отлично! Теперь введите название вашего мероприятия или цель бронирования.";

pub const CHOOSE_ROOM: &str = "Выберите, пожалуйста, помещение:";

pub const ASK_DATE: &str =
    "Пожалуйста, введите дату бронирования в формате ДД/ММ/ГГГГ (например, 03/03/2025).";

pub const DATE_FORMAT_HINT: &str =
    "Пожалуйста, введите дату в формате ДД/ММ/ГГГГ (например, 03/03/2025).";

pub const DATE_IN_PAST: &str = "Пожалуйста, выберите дату не раньше сегодняшнего дня.";

pub const CHOOSE_START_TIME: &str = "Выберите время начала (с 9:00 до 22:00):";

pub fn choose_end_time(start: &str) -> String {
    format!("Выбрано время начала: {start}. Выберите время окончания:")
}

pub const ASK_CUSTOM_TIME: &str = "Пожалуйста, введите начальное и конечное время в формате \
     ЧЧ:ММ-ЧЧ:ММ (например, 09:00-11:30).";

pub const CUSTOM_TIME_HINT: &str =
    "Пожалуйста, введите время в формате ЧЧ:ММ-ЧЧ:ММ (например, 09:00-11:30).";

pub const ASK_POSTER: &str = "Нужна ли вам афиша для анонса мероприятия?";

pub fn confirmation(form: &BookingForm) -> String {
    format!(
        "Пожалуйста, проверьте данные бронирования:\n\n{}\n\nВсё верно?",
        notification::render_fields(form)
    )
}

pub fn booking_sent() -> String {
    format!(
        "Спасибо, мы свяжемся с вами в течение суток. Если вы не получили от нас ответа, пишите \
         на {FALLBACK_CONTACT}. Пока ждёте от нас ответа, ознакомьтесь, пожалуйста, с условиями \
         <a href=\"{TERMS_URL}\">бронирования</a>"
    )
}

pub const BOOKING_CANCELLED: &str =
    "Бронирование отменено. Чтобы начать заново, введите /book.";

pub fn booking_failed() -> String {
    format!(
        "Произошла ошибка при бронировании. Пожалуйста, попробуйте ещё раз или свяжитесь с \
         менеджером {FALLBACK_CONTACT}."
    )
}

pub const RESTART_HINT: &str = "Пожалуйста, нажмите /start для начала бронирования.";
