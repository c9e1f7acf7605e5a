use weathernow_core::{AppError, WeatherError};
use weathernow_weather::FetchError;

pub fn fetch_error_to_app_error(e: FetchError) -> AppError {
    AppError::Weather(WeatherError::FetchFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_share_one_message() {
        let status = fetch_error_to_app_error(FetchError::Status {
            endpoint: "current.json",
            status: 400,
        });
        let parse = fetch_error_to_app_error(FetchError::Parse {
            endpoint: "forecast.json",
            message: "expected value".into(),
        });

        assert_eq!(status.user_message(), parse.user_message());
        assert_eq!(
            status.user_message(),
            "Unable to fetch weather data. Please check your location and try again."
        );
        assert!(status.to_string().contains("HTTP 400"));
    }
}
